//! Collision mesh representations
//!
//! Mesh-based collision geometry for the precise movement path: a model-space
//! template transformed once into world space, with a cached bounding box for
//! broad-phase rejection.

use crate::foundation::math::{Transform, Vec3};
use super::primitives::{Triangle, Ray, AABB};

/// A collision mesh template stored in MODEL SPACE (local coordinates)
#[derive(Debug, Clone)]
pub struct CollisionMeshTemplate {
    /// Triangles in MODEL SPACE (local coordinates, never modified)
    pub local_triangles: Vec<Triangle>,
}

impl CollisionMeshTemplate {
    /// Creates a new collision mesh template from MODEL SPACE vertices and indices.
    /// Index triples that reference missing vertices are skipped.
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let local_triangles = indices
            .chunks_exact(3)
            .filter_map(|chunk| {
                let v0 = vertices.get(chunk[0] as usize)?;
                let v1 = vertices.get(chunk[1] as usize)?;
                let v2 = vertices.get(chunk[2] as usize)?;
                Some(Triangle::new(*v0, *v1, *v2))
            })
            .collect();

        Self { local_triangles }
    }

    /// Unit box centered on the origin with the given half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);
        let vertices = [
            Vec3::new(-x, -y, -z),
            Vec3::new(x, -y, -z),
            Vec3::new(x, y, -z),
            Vec3::new(-x, y, -z),
            Vec3::new(-x, -y, z),
            Vec3::new(x, -y, z),
            Vec3::new(x, y, z),
            Vec3::new(-x, y, z),
        ];
        let indices = [
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 7, 6, 3, 6, 2, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Self::from_vertices(&vertices, &indices)
    }

    /// Transform this template to world space
    pub fn to_world_space(&self, transform: &Transform) -> WorldSpaceCollisionMesh {
        let triangles: Vec<Triangle> = self
            .local_triangles
            .iter()
            .map(|tri| {
                Triangle::new(
                    transform.transform_point(tri.v0),
                    transform.transform_point(tri.v1),
                    transform.transform_point(tri.v2),
                )
            })
            .collect();
        WorldSpaceCollisionMesh::new(triangles)
    }

    /// Translate the template without rotation or scale
    pub fn translated(&self, offset: Vec3) -> WorldSpaceCollisionMesh {
        let triangles = self
            .local_triangles
            .iter()
            .map(|tri| Triangle::new(tri.v0 + offset, tri.v1 + offset, tri.v2 + offset))
            .collect();
        WorldSpaceCollisionMesh::new(triangles)
    }
}

/// World-space collision mesh with a cached bounding box
#[derive(Debug, Clone)]
pub struct WorldSpaceCollisionMesh {
    /// Triangles in world space
    pub triangles: Vec<Triangle>,
    /// Bounding box of all triangles
    pub bounds: AABB,
}

impl WorldSpaceCollisionMesh {
    /// Build a mesh from world-space triangles
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let bounds = AABB::from_points(triangles.iter().flat_map(Triangle::vertices))
            .unwrap_or_else(|| AABB::new(Vec3::zeros(), Vec3::zeros()));
        Self { triangles, bounds }
    }

    /// Test ray intersection against all triangles in the mesh
    /// Returns closest hit (t, hit_point, normal) if any triangle is hit
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3, Vec3)> {
        self.bounds.intersect_ray(ray)?;

        let mut closest_hit: Option<(f32, Vec3, Vec3)> = None;
        for triangle in &self.triangles {
            if let Some((t, _u, _v)) = triangle.intersect_ray(ray) {
                if closest_hit.map_or(true, |(best, _, _)| t < best) {
                    closest_hit = Some((t, ray.point_at(t), triangle.normal()));
                }
            }
        }
        closest_hit
    }

    /// Exact mesh-mesh intersection, after a bounding-box rejection
    pub fn intersects_mesh(&self, other: &WorldSpaceCollisionMesh) -> bool {
        if !self.bounds.intersects(&other.bounds) {
            return false;
        }

        for tri_a in &self.triangles {
            if !tri_a.aabb().intersects(&other.bounds) {
                continue;
            }
            for tri_b in &other.triangles {
                if tri_a.intersects_triangle(tri_b) {
                    return true;
                }
            }
        }
        false
    }
}
