//! # Collider Engine
//!
//! Ground-height and blocking collision for top-down 2.5D worlds.
//!
//! ## Features
//!
//! - **Collider model**: boxes and cylinders that block, floors and ramps
//!   that carry a sampled height map
//! - **Persistence**: one JSON collision setup per model, in memory or on disk
//! - **Decomposition**: floors and walls derived from model geometry
//! - **Authoring**: an editing session with tools, picking and shortcuts
//! - **Runtime**: per-axis blocking and eased ground height for actors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collider_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::new("collision_data");
//!     let mut registry = ModelRegistry::new();
//!     registry.register(RegisteredModel::new("hut", "models/hut.obj", Vec3::new(4.0, 0.0, 2.0)));
//!
//!     let (colliders, _report) = SceneBuilder::new(&store).build(&registry);
//!     let resolver = MovementResolver::new(ResolverConfig::default());
//!     let actor = resolver.actor_at(Vec3::zeros());
//!     let step = resolver.resolve(&colliders, &actor, 0.1, 0.0);
//!     println!("moved to {:?}", step.apply(actor.position));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Shared configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod input;

// Collision data and the stages that produce and consume it
pub mod collider;
pub mod store;
pub mod decomposition;
pub mod authoring;
pub mod placement;
pub mod physics;
pub mod scene;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{GeometrySource, MeshGeometry, ObjLoader},
        authoring::{AuthoringSession, EditorCommand, KeyBindings, ToolMode},
        collider::{ColliderPrimitive, CollisionSetup, ModelRegistry, RegisteredModel, ShapeKind},
        config::Config,
        core::config::{AuthoringConfig, CollisionConfig, DecompositionConfig, ResolverConfig},
        decomposition::Decomposer,
        foundation::math::{Transform, Vec2, Vec3},
        input::KeyCode,
        physics::{Actor, ColliderSet, MoveOutcome, MovementResolver},
        placement::Placement,
        scene::SceneBuilder,
        store::{CollisionStore, FileStore, MemoryStore},
    };
}
