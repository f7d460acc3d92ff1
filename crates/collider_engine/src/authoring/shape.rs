//! Base geometry of authored shapes
//!
//! Every authored collider is a base mesh scaled per axis. The base meshes are
//! not all unit sized (the cylinder is one unit wide and two tall), so world
//! dimensions are always derived from the measured base bounds, never from
//! the scale alone.

use crate::collider::ShapeKind;
use crate::foundation::math::{utils::deg_to_rad, Vec3};
use crate::physics::collision::{CollisionMeshTemplate, AABB};

const CYLINDER_SEGMENTS: usize = 16;

/// Tilt given to a freshly placed ramp, about X
pub const RAMP_TILT_DEGREES: f32 = 30.0;

/// Unit-scale mesh of a shape, centered on the origin
pub fn base_mesh(kind: ShapeKind) -> CollisionMeshTemplate {
    match kind {
        ShapeKind::Box | ShapeKind::Floor | ShapeKind::Ramp => CollisionMeshTemplate::cuboid(Vec3::new(0.5, 0.5, 0.5)),
        ShapeKind::Cylinder => cylinder_mesh(0.5, 2.0),
    }
}

fn cylinder_mesh(radius: f32, height: f32) -> CollisionMeshTemplate {
    let half = height * 0.5;
    let mut vertices = vec![Vec3::new(0.0, -half, 0.0), Vec3::new(0.0, half, 0.0)];
    for i in 0..CYLINDER_SEGMENTS {
        let angle = i as f32 / CYLINDER_SEGMENTS as f32 * std::f32::consts::TAU;
        let (x, z) = (radius * angle.cos(), radius * angle.sin());
        vertices.push(Vec3::new(x, -half, z));
        vertices.push(Vec3::new(x, half, z));
    }

    let mut indices = Vec::with_capacity(CYLINDER_SEGMENTS * 12);
    for i in 0..CYLINDER_SEGMENTS {
        let bottom = (2 + 2 * i) as u32;
        let top = bottom + 1;
        let next_bottom = (2 + 2 * ((i + 1) % CYLINDER_SEGMENTS)) as u32;
        let next_top = next_bottom + 1;
        indices.extend_from_slice(&[0, next_bottom, bottom]);
        indices.extend_from_slice(&[1, top, next_top]);
        indices.extend_from_slice(&[bottom, next_bottom, next_top]);
        indices.extend_from_slice(&[bottom, next_top, top]);
    }
    CollisionMeshTemplate::from_vertices(&vertices, &indices)
}

/// Width, height and depth of the base mesh at unit scale
pub fn base_dimensions(kind: ShapeKind) -> Vec3 {
    AABB::from_points(base_mesh(kind).local_triangles.iter().flat_map(|tri| tri.vertices()))
        .map(|aabb| aabb.size())
        .unwrap_or_else(|| Vec3::new(1.0, 1.0, 1.0))
}

/// Scale a freshly placed shape starts with
pub fn default_scale(kind: ShapeKind) -> Vec3 {
    match kind {
        ShapeKind::Box => Vec3::new(2.0, 2.0, 2.0),
        ShapeKind::Cylinder => Vec3::new(2.0, 1.5, 2.0),
        ShapeKind::Floor | ShapeKind::Ramp => Vec3::new(4.0, 0.2, 4.0),
    }
}

/// Rotation a freshly placed shape starts with
pub fn default_rotation(kind: ShapeKind) -> Vec3 {
    match kind {
        ShapeKind::Ramp => Vec3::new(deg_to_rad(RAMP_TILT_DEGREES), 0.0, 0.0),
        _ => Vec3::zeros(),
    }
}
