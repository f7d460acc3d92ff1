//! Scene build
//!
//! Turns the model instances of a scene into the collider set the movement
//! resolver runs against, one typed stage at a time:
//!
//! ```text
//! ModelRegistry + CollisionStore
//!      ↓ load      (CollisionSetup per instance)
//!      ↓ place     (PlacedSetup in world space)
//!      ↓ register  (ColliderSet)
//! ```
//!
//! A missing setup gives an instance zero colliders; a malformed one is
//! reported and skipped without stopping the build.

mod build;

pub use build::{BuildReport, LoadedSetup, SceneBuilder};
