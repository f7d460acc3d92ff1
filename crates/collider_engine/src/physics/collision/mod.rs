//! Collision geometry
//!
//! # Architecture
//!
//! - **Model Space Storage**: mesh templates keep local coordinates
//! - **Placed Shapes**: colliders reach the resolver already in world space
//! - **Ground Plane**: footprints are tested on XZ, heights come from floor zones
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, boxes, rectangles, triangles
//! - [`mesh`] - Triangle meshes for the mesh-precision path
//! - [`shape`] - Placed blocking shapes

pub mod primitives;
pub mod mesh;
pub mod shape;

pub use primitives::{Ray, Rect, Triangle, AABB};
pub use mesh::{CollisionMeshTemplate, WorldSpaceCollisionMesh};
pub use shape::BlockingShape;
