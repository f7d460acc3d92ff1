//! Runtime collision
//!
//! Placed colliders live in a [`ColliderSet`]; the [`MovementResolver`]
//! answers, per step, how far an actor may move and what height it should
//! rest at.

pub mod collision;
pub mod collider_set;
pub mod floor_zone;
pub mod resolver;

pub use collision::{BlockingShape, CollisionMeshTemplate, Ray, Rect, Triangle, WorldSpaceCollisionMesh, AABB};
pub use collider_set::ColliderSet;
pub use floor_zone::{FloorZone, SurfaceKind};
pub use resolver::{Actor, MoveOutcome, MovementResolver};
