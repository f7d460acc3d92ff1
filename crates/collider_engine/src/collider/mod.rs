//! Collider data model
//!
//! Primitive shapes, height maps, per-model setups and their persisted
//! record format, plus the registry of model instances.

pub mod heightmap;
pub mod primitive;
pub mod record;
pub mod registry;
pub mod setup;

pub use heightmap::HeightMap;
pub use primitive::{ColliderPrimitive, ShapeKind, Surface};
pub use record::{ColliderRecord, Vec3Record, DEFAULT_HEIGHT_MAP_RESOLUTION};
pub use registry::{ModelRegistry, RegisteredModel};
pub use setup::{CollisionSetup, CollisionSetupRecord};

/// Collider data errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColliderError {
    /// Sample count does not match the resolution
    #[error("height map of resolution {resolution} needs {expected} samples, got {actual}")]
    HeightMapSize {
        /// Cells per axis
        resolution: usize,
        /// `(resolution + 1)²`
        expected: usize,
        /// Samples provided
        actual: usize,
    },

    /// Record fields do not match its type
    #[error("malformed collider: {0}")]
    Malformed(String),
}
