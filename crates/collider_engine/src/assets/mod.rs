//! Model geometry
//!
//! Meshes are loaded from OBJ files into [`MeshGeometry`] for decomposition
//! and picking. Loading may still be in flight, modelled by
//! [`GeometrySource`].

pub mod mesh;
pub mod obj_loader;

pub use mesh::{GeometrySource, MeshGeometry};
pub use obj_loader::{MeshLoadError, ObjLoader};
