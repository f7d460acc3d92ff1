//! Floor detection

use std::collections::BTreeSet;

use crate::assets::MeshGeometry;
use crate::collider::{ColliderPrimitive, HeightMap, Surface};
use crate::core::config::DecompositionConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::collision::{Rect, Triangle};
use crate::physics::{FloorZone, SurfaceKind};
use super::classify::Layer;

/// Horizontal faces of one layer that are large enough to walk on
#[derive(Debug, Clone, PartialEq)]
pub struct FloorCandidate {
    /// Layer the faces were found in
    pub layer: usize,
    /// XZ rectangle around the faces
    pub bounds: Rect,
    /// Mean vertex height of the faces
    pub mean_height: f32,
    /// Face indices
    pub faces: BTreeSet<usize>,
}

/// One candidate per layer whose horizontal faces span more than the
/// minimum size on both axes. A face set already emitted by the layer below
/// is not emitted again.
pub fn find_floor_candidates(mesh: &MeshGeometry, layers: &[Layer], config: &DecompositionConfig) -> Vec<FloorCandidate> {
    let mut candidates: Vec<FloorCandidate> = Vec::new();

    for layer in layers {
        let vertices: Vec<Vec3> = layer
            .horizontal
            .iter()
            .filter_map(|&face| mesh.triangle(face))
            .flat_map(|tri| tri.vertices())
            .collect();
        if vertices.is_empty() {
            continue;
        }

        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in &vertices {
            min = min.inf(&v.xz());
            max = max.sup(&v.xz());
        }
        let bounds = Rect::new(min, max);
        let size = bounds.size();
        if size.x <= config.min_floor_size || size.y <= config.min_floor_size {
            continue;
        }

        if candidates.iter().any(|c| c.faces == layer.horizontal) {
            log::debug!("Layer {} repeats a floor from the layer below", layer.index);
            continue;
        }

        let mean_height = vertices.iter().map(|v| v.y).sum::<f32>() / vertices.len() as f32;
        candidates.push(FloorCandidate {
            layer: layer.index,
            bounds,
            mean_height,
            faces: layer.horizontal.clone(),
        });
    }
    candidates
}

/// Sample the candidate's faces at every grid point. Points covered by
/// several faces take the highest; uncovered points take the mean height.
pub fn sample_height_map(mesh: &MeshGeometry, candidate: &FloorCandidate, resolution: usize) -> HeightMap {
    let triangles: Vec<Triangle> = candidate.faces.iter().filter_map(|&face| mesh.triangle(face)).collect();
    let resolution = resolution.max(1);
    let cell = candidate.bounds.size() / resolution as f32;

    HeightMap::from_fn(resolution, |ix, iz| {
        let point = candidate.bounds.min + Vec2::new(ix as f32 * cell.x, iz as f32 * cell.y);
        triangles
            .iter()
            .filter_map(|tri| tri.height_at(point))
            .reduce(f32::max)
            .unwrap_or(candidate.mean_height)
    })
}

/// Turn a candidate into a floor collider and its zone
pub fn build_floor(mesh: &MeshGeometry, candidate: &FloorCandidate, config: &DecompositionConfig) -> (ColliderPrimitive, FloorZone) {
    let height_map = sample_height_map(mesh, candidate, config.height_map_resolution);
    let center = candidate.bounds.center();
    let size = candidate.bounds.size();
    let thickness = config.floor_thickness;

    let surface = Surface {
        position: Vec3::new(center.x, candidate.mean_height - thickness * 0.5, center.y),
        rotation: Vec3::zeros(),
        size: Vec3::new(size.x, thickness, size.y),
        bounds: candidate.bounds,
        height_map: height_map.clone(),
    };
    let zone = FloorZone::new(candidate.bounds, height_map, SurfaceKind::Floor);
    (ColliderPrimitive::Floor(surface), zone)
}
