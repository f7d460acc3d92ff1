//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, boxes, rectangles, triangles)
//! with the intersection and interpolation tests used by decomposition,
//! picking and the movement resolver.

use crate::foundation::math::{Vec2, Vec3};

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for point in iter {
            aabb.grow(point);
        }
        Some(aabb)
    }

    /// Extend the box so it contains `point`
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// XZ footprint of this box
    pub fn footprint(&self) -> Rect {
        Rect::new(Vec2::new(self.min.x, self.min.z), Vec2::new(self.max.x, self.max.z))
    }

    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            // 0 when the origin is inside the box
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle on the XZ ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum (x, z) corner
    pub min: Vec2,
    /// Maximum (x, z) corner
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle centered on `center` with the given full width (x) and depth (z)
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Width (x) and depth (z)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Strict overlap test; touching edges do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x &&
        self.min.y < other.max.y && self.max.y > other.min.y
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Vertices as an array
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Calculates the normal of the triangle (right-hand rule).
    /// Degenerate triangles yield the zero vector.
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Lowest and highest Y of the three vertices
    pub fn y_range(&self) -> (f32, f32) {
        (
            self.v0.y.min(self.v1.y).min(self.v2.y),
            self.v0.y.max(self.v1.y).max(self.v2.y),
        )
    }

    /// Bounding box of the triangle
    pub fn aabb(&self) -> AABB {
        AABB::new(self.v0.inf(&self.v1).inf(&self.v2), self.v0.sup(&self.v1).sup(&self.v2))
    }

    /// Barycentric weights of `point` with respect to the triangle projected
    /// onto the XZ plane. Returns `None` for triangles with no XZ area.
    pub fn barycentric_xz(&self, point: Vec2) -> Option<(f32, f32, f32)> {
        let a = Vec2::new(self.v0.x, self.v0.z);
        let b = Vec2::new(self.v1.x, self.v1.z);
        let c = Vec2::new(self.v2.x, self.v2.z);

        let v0 = c - a;
        let v1 = b - a;
        let v2 = point - a;

        let dot00 = v0.dot(&v0);
        let dot01 = v0.dot(&v1);
        let dot02 = v0.dot(&v2);
        let dot11 = v1.dot(&v1);
        let dot12 = v1.dot(&v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / denom;
        let u = (dot11 * dot02 - dot01 * dot12) * inv; // weight of c
        let v = (dot00 * dot12 - dot01 * dot02) * inv; // weight of b
        Some((1.0 - u - v, v, u))
    }

    /// Height of the triangle's plane above `point` when the point lies inside
    /// the triangle's XZ projection (edges inclusive).
    pub fn height_at(&self, point: Vec2) -> Option<f32> {
        const EDGE_TOLERANCE: f32 = 1e-5;
        let (w0, w1, w2) = self.barycentric_xz(point)?;
        if w0 < -EDGE_TOLERANCE || w1 < -EDGE_TOLERANCE || w2 < -EDGE_TOLERANCE {
            return None;
        }
        Some(w0 * self.v0.y + w1 * self.v1.y + w2 * self.v2.y)
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None
        }
    }

    /// Test if this triangle intersects another triangle
    /// Uses the Separating Axis Theorem over 17 candidate axes:
    /// - 2 face normals (one per triangle)
    /// - 9 edge-edge cross products
    /// - 6 in-plane edge normals (needed when the triangles are coplanar)
    pub fn intersects_triangle(&self, other: &Triangle) -> bool {
        const EPSILON: f32 = 0.000001;

        fn project_triangle(tri: &Triangle, axis: Vec3) -> (f32, f32) {
            let p0 = axis.dot(&tri.v0);
            let p1 = axis.dot(&tri.v1);
            let p2 = axis.dot(&tri.v2);
            (p0.min(p1).min(p2), p0.max(p1).max(p2))
        }

        // false if `axis` separates the triangles
        fn test_axis(tri1: &Triangle, tri2: &Triangle, axis: Vec3) -> bool {
            let axis_len_sq = axis.magnitude_squared();
            if axis_len_sq < EPSILON {
                return true;
            }
            let normalized_axis = axis * (1.0 / axis_len_sq.sqrt());
            let (min1, max1) = project_triangle(tri1, normalized_axis);
            let (min2, max2) = project_triangle(tri2, normalized_axis);
            max1 >= min2 && max2 >= min1
        }

        let edges1 = [self.v1 - self.v0, self.v2 - self.v1, self.v0 - self.v2];
        let edges2 = [other.v1 - other.v0, other.v2 - other.v1, other.v0 - other.v2];

        let n1 = self.normal();
        let n2 = other.normal();
        if !test_axis(self, other, n1) || !test_axis(self, other, n2) {
            return false;
        }
        for edge1 in &edges1 {
            for edge2 in &edges2 {
                if !test_axis(self, other, edge1.cross(edge2)) {
                    return false;
                }
            }
        }
        for edge in &edges1 {
            if !test_axis(self, other, n1.cross(edge)) {
                return false;
            }
        }
        for edge in &edges2 {
            if !test_axis(self, other, n2.cross(edge)) {
                return false;
            }
        }

        true
    }
}
