//! Mesh decomposition
//!
//! Turns model geometry into colliders without hand authoring. The mesh's
//! height is sliced into layers and each face is classified by the vertical
//! component of its averaged normal:
//!
//! - horizontal faces of a layer become one floor with a sampled height map
//! - vertical faces of all layers are grouped by wall direction into boxes
//! - pillar detection is reserved and emits nothing
//!
//! Results are in the mesh's own (analysis) space; [`Decomposition::into_setup`]
//! re-expresses them relative to a model's canonical pose.

pub mod classify;
pub mod floors;
pub mod pillars;
pub mod walls;

pub use classify::{classify_normal, slice_layers, FaceClass, Layer};
pub use floors::FloorCandidate;

use thiserror::Error;

use crate::assets::GeometrySource;
use crate::collider::{ColliderPrimitive, CollisionSetup};
use crate::core::config::DecompositionConfig;
use crate::physics::FloorZone;
use crate::placement::Placement;

/// Decomposition errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecompositionError {
    /// Geometry is still loading or has no triangles
    #[error("geometry is not available for decomposition")]
    GeometryUnavailable,
}

/// Colliders and floor zones found in a mesh, in analysis space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decomposition {
    /// Floors followed by walls
    pub colliders: Vec<ColliderPrimitive>,
    /// Zones of the detected floors
    pub floor_zones: Vec<FloorZone>,
}

impl Decomposition {
    /// Re-express the colliders relative to the canonical pose that
    /// `placement` puts into analysis space
    pub fn into_setup(self, model_path: impl Into<String>, placement: &Placement) -> CollisionSetup {
        let colliders = self.colliders.iter().map(|c| placement.collider_to_local(c)).collect();
        CollisionSetup::new(model_path, colliders)
    }
}

/// Runs decomposition with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecompositionConfig,
}

impl Decomposer {
    /// Create a decomposer
    pub fn new(config: DecompositionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Decompose loaded geometry
    pub fn decompose(&self, source: &GeometrySource) -> Result<Decomposition, DecompositionError> {
        let mesh = match source.ready() {
            Some(mesh) if !mesh.is_empty() => mesh,
            _ => {
                log::warn!("Decomposition requested before geometry was available");
                return Err(DecompositionError::GeometryUnavailable);
            }
        };

        let layers = slice_layers(mesh, &self.config);
        let mut result = Decomposition::default();

        for candidate in floors::find_floor_candidates(mesh, &layers, &self.config) {
            let (floor, zone) = floors::build_floor(mesh, &candidate, &self.config);
            result.colliders.push(floor);
            result.floor_zones.push(zone);
        }
        let floor_count = result.colliders.len();

        result.colliders.extend(walls::find_walls(mesh, &layers, &self.config));
        let wall_count = result.colliders.len() - floor_count;
        result.colliders.extend(pillars::find_pillars(mesh, &layers, &self.config));

        log::info!(
            "Decomposed {} triangles over {} layers: {} floors, {} walls",
            mesh.triangle_count(),
            layers.len(),
            floor_count,
            wall_count
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshGeometry;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_pending_or_empty_geometry_is_unavailable() {
        let decomposer = Decomposer::default();
        assert_eq!(
            decomposer.decompose(&GeometrySource::Pending),
            Err(DecompositionError::GeometryUnavailable)
        );
        let empty = MeshGeometry::new(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(
            decomposer.decompose(&GeometrySource::Ready(empty)),
            Err(DecompositionError::GeometryUnavailable)
        );
    }

    #[test]
    fn test_flat_floor_becomes_floor_collider() {
        let positions = vec![
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(2.0, 0.0, 2.0),
            Vec3::new(-2.0, 0.0, 2.0),
        ];
        let mesh = MeshGeometry::new(positions, Vec::new(), vec![0, 2, 1, 0, 3, 2]);
        let result = Decomposer::default().decompose(&mesh.into()).unwrap();
        assert_eq!(result.colliders.len(), 1);
        assert_eq!(result.floor_zones.len(), 1);
        assert!(result.colliders[0].is_walkable());
        assert!(result.floor_zones[0].height_map.samples().iter().all(|&h| h == 0.0));
    }
}
