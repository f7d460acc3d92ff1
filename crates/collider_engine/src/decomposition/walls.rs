//! Wall detection

use std::collections::{BTreeMap, BTreeSet};

use crate::assets::MeshGeometry;
use crate::collider::ColliderPrimitive;
use crate::core::config::DecompositionConfig;
use crate::foundation::math::Vec3;
use crate::physics::collision::{Triangle, AABB};
use super::classify::Layer;

/// Quantized XZ direction of a wall, in tenths
pub type WallKey = (i32, i32);

/// Direction of the triangle's longest edge projected onto XZ, normalized,
/// sign-canonicalized and rounded to one decimal. Faces without horizontal
/// extent have no key.
pub fn wall_direction_key(triangle: &Triangle) -> Option<WallKey> {
    let [a, b, c] = triangle.vertices();
    let edge = [b - a, c - b, a - c]
        .into_iter()
        .map(|e| e.xz())
        .max_by(|l, r| l.magnitude_squared().total_cmp(&r.magnitude_squared()))?;
    let mut dir = edge.try_normalize(1e-6)?;
    if dir.x < 0.0 || (dir.x == 0.0 && dir.y < 0.0) {
        dir = -dir;
    }
    let tenths = |v: f32| (v * 10.0).round() as i32;
    let key = (tenths(dir.x), tenths(dir.y));
    // -0.04 rounds to zero, so fold the sign once more after quantizing
    Some(if key.0 == 0 && key.1 < 0 { (0, -key.1) } else { key })
}

/// Group every vertical face of every layer by wall direction, counting a
/// face once however many layers it spans. Groups that are big enough
/// become boxes.
pub fn find_walls(mesh: &MeshGeometry, layers: &[Layer], config: &DecompositionConfig) -> Vec<ColliderPrimitive> {
    let faces: BTreeSet<usize> = layers.iter().flat_map(|layer| layer.vertical.iter().copied()).collect();

    let mut groups: BTreeMap<WallKey, Vec<Triangle>> = BTreeMap::new();
    for face in faces {
        let Some(triangle) = mesh.triangle(face) else { continue };
        if let Some(key) = wall_direction_key(&triangle) {
            groups.entry(key).or_default().push(triangle);
        }
    }

    let mut walls = Vec::new();
    for (key, triangles) in groups {
        if triangles.len() < config.min_wall_faces {
            continue;
        }
        let Some(aabb) = AABB::from_points(triangles.iter().flat_map(Triangle::vertices)) else {
            continue;
        };
        let size = aabb.size();
        if size.y > config.min_wall_height && (size.x > config.min_wall_width || size.z > config.min_wall_width) {
            log::debug!("Wall {key:?}: {} faces, size {size:?}", triangles.len());
            walls.push(ColliderPrimitive::Box {
                position: aabb.center(),
                rotation: Vec3::zeros(),
                half_extents: aabb.extents(),
            });
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::classify::slice_layers;

    fn wall_quad(z: f32, x0: f32, x1: f32, height: f32, base: u32) -> (Vec<Vec3>, Vec<u32>) {
        let positions = vec![
            Vec3::new(x0, 0.0, z),
            Vec3::new(x1, 0.0, z),
            Vec3::new(x1, height, z),
            Vec3::new(x0, height, z),
        ];
        (positions, vec![base, base + 1, base + 2, base, base + 2, base + 3])
    }

    #[test]
    fn test_direction_key_is_sign_canonical() {
        let forward = Triangle::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        let backward = Triangle::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(wall_direction_key(&forward), Some((10, 0)));
        assert_eq!(wall_direction_key(&forward), wall_direction_key(&backward));
        let flat = Triangle::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(wall_direction_key(&flat), None);
    }

    #[test]
    fn test_wall_needs_three_faces_and_size() {
        let config = DecompositionConfig::default();

        // Two faces: below the face count
        let (positions, indices) = wall_quad(0.0, 0.0, 4.0, 2.0, 0);
        let mesh = MeshGeometry::new(positions, Vec::new(), indices);
        assert!(find_walls(&mesh, &slice_layers(&mesh, &config), &config).is_empty());

        // Four faces along the same direction
        let (mut positions, mut indices) = wall_quad(0.0, 0.0, 4.0, 2.0, 0);
        let (more_positions, more_indices) = wall_quad(0.0, 4.0, 6.0, 2.0, 4);
        positions.extend(more_positions);
        indices.extend(more_indices);
        let mesh = MeshGeometry::new(positions, Vec::new(), indices);
        let walls = find_walls(&mesh, &slice_layers(&mesh, &config), &config);
        assert_eq!(walls.len(), 1);
        match &walls[0] {
            ColliderPrimitive::Box { position, half_extents, .. } => {
                assert_eq!(*position, Vec3::new(3.0, 1.0, 0.0));
                assert_eq!(*half_extents, Vec3::new(3.0, 1.0, 0.0));
            }
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn test_short_wall_is_dropped() {
        let config = DecompositionConfig::default();
        let (mut positions, mut indices) = wall_quad(0.0, 0.0, 4.0, 0.4, 0);
        let (more_positions, more_indices) = wall_quad(0.0, 4.0, 6.0, 0.4, 4);
        positions.extend(more_positions);
        indices.extend(more_indices);
        let mesh = MeshGeometry::new(positions, Vec::new(), indices);
        assert!(find_walls(&mesh, &slice_layers(&mesh, &config), &config).is_empty());
    }
}
