//! Analysis meshes

use crate::foundation::math::Vec3;
use crate::physics::collision::{CollisionMeshTemplate, Triangle, AABB};

/// Indexed triangle mesh handed to decomposition
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; empty when the source had none
    pub normals: Vec<Vec3>,
    /// Triangle list indices
    pub indices: Vec<u32>,
    /// Bounds of all positions
    pub bounds: AABB,
}

impl MeshGeometry {
    /// Build a mesh and compute its bounds. Normals are dropped unless there
    /// is exactly one per position.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = AABB::from_points(positions.iter().copied())
            .unwrap_or_else(|| AABB::new(Vec3::zeros(), Vec3::zeros()));
        let normals = if normals.len() == positions.len() { normals } else { Vec::new() };
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether there is nothing to analyse
    pub fn is_empty(&self) -> bool {
        self.triangles().next().is_none()
    }

    fn corner(&self, index: u32) -> Option<Vec3> {
        self.positions.get(index as usize).copied()
    }

    /// Triangle `i`, if all of its indices are valid
    pub fn triangle(&self, i: usize) -> Option<Triangle> {
        let chunk = self.indices.get(i * 3..i * 3 + 3)?;
        Some(Triangle::new(self.corner(chunk[0])?, self.corner(chunk[1])?, self.corner(chunk[2])?))
    }

    /// Valid triangles with their index
    pub fn triangles(&self) -> impl Iterator<Item = (usize, Triangle)> + '_ {
        (0..self.triangle_count()).filter_map(move |i| self.triangle(i).map(|tri| (i, tri)))
    }

    /// Average of the triangle's vertex normals, or its face normal when the
    /// mesh has no normals
    pub fn averaged_normal(&self, i: usize) -> Vec3 {
        let face = || self.triangle(i).map(|tri| tri.normal()).unwrap_or_else(Vec3::zeros);
        if self.normals.is_empty() {
            return face();
        }
        let Some(chunk) = self.indices.get(i * 3..i * 3 + 3) else {
            return Vec3::zeros();
        };
        let sum = chunk
            .iter()
            .filter_map(|&index| self.normals.get(index as usize))
            .fold(Vec3::zeros(), |acc, n| acc + n);
        sum.try_normalize(1e-6).unwrap_or_else(face)
    }

    /// Collision template over the same triangles
    pub fn to_collision_template(&self) -> CollisionMeshTemplate {
        CollisionMeshTemplate::from_vertices(&self.positions, &self.indices)
    }
}

/// Geometry that may still be loading
#[derive(Debug, Clone, PartialEq)]
pub enum GeometrySource {
    /// Not loaded yet
    Pending,
    /// Loaded and ready to analyse
    Ready(MeshGeometry),
}

impl GeometrySource {
    /// The mesh, once loaded
    pub fn ready(&self) -> Option<&MeshGeometry> {
        match self {
            GeometrySource::Pending => None,
            GeometrySource::Ready(mesh) => Some(mesh),
        }
    }
}

impl From<MeshGeometry> for GeometrySource {
    fn from(mesh: MeshGeometry) -> Self {
        GeometrySource::Ready(mesh)
    }
}
