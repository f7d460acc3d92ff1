//! Interactive collider authoring
//!
//! An [`AuthoringSession`] holds the colliders of one model while they are
//! being edited. Shapes are placed at the origin, selected, then moved,
//! resized or rotated with the active [`ToolMode`]. Nothing reaches the
//! store until an explicit save.
//!
//! Commands never abort the session: failures become [`Notification`]s.

pub mod camera;
pub mod commands;
pub mod persistence;
pub mod session;
pub mod shape;

pub use camera::FlyCamera;
pub use commands::{EditorCommand, KeyBindings, ToolMode};
pub use session::{AuthoringSession, EditableCollider, Notification, NotificationLevel, RenderProxy};

use thiserror::Error;

use crate::input::KeyCode;
use crate::store::StoreError;

/// Authoring errors
#[derive(Error, Debug)]
pub enum AuthoringError {
    /// The command needs a selected collider
    #[error("no collider is selected")]
    NothingSelected,

    /// The id does not name a live collider
    #[error("collider no longer exists")]
    UnknownCollider,

    /// The key belongs to the fly camera
    #[error("{0:?} is reserved for camera movement")]
    ReservedKey(KeyCode),

    /// Persistence failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// File access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Imported data is not a valid setup
    #[error("import failed: {0}")]
    Malformed(String),

    /// Export could not be serialized
    #[error("export failed: {0}")]
    Serialize(String),
}
