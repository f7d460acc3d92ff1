//! Collider primitive shapes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{quat_from_euler, Vec3};
use crate::physics::collision::{Rect, AABB};
use super::heightmap::HeightMap;

/// The four collider shape types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Solid box
    Box,
    /// Upright cylinder
    Cylinder,
    /// Walkable plate
    Floor,
    /// Walkable tilted plate
    Ramp,
}

impl ShapeKind {
    /// All shape kinds, in menu order
    pub const ALL: [ShapeKind; 4] = [ShapeKind::Box, ShapeKind::Cylinder, ShapeKind::Floor, ShapeKind::Ramp];

    /// Floors and ramps are walkable, boxes and cylinders never are
    pub fn is_walkable(self) -> bool {
        matches!(self, ShapeKind::Floor | ShapeKind::Ramp)
    }

    /// Lowercase name used in records and commands
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Floor => "floor",
            ShapeKind::Ramp => "ramp",
        }
    }

    /// Parse a lowercase shape name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A walkable plate with a sampled height surface
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Center of the plate
    pub position: Vec3,
    /// Euler rotation in radians. For ramps this is the tilt the surface is derived from.
    pub rotation: Vec3,
    /// Plate dimensions: width, thickness, depth
    pub size: Vec3,
    /// XZ rectangle covered by the height map
    pub bounds: Rect,
    /// Heights sampled over `bounds`
    pub height_map: HeightMap,
}

impl Surface {
    /// Build a plate and sample the plane of its top face at `resolution`
    /// cells per axis.
    pub fn from_plate(position: Vec3, rotation: Vec3, size: Vec3, resolution: usize) -> Self {
        let orientation = quat_from_euler(rotation);
        let half = size * 0.5;
        let normal = orientation * Vec3::y();
        let top = position + orientation * Vec3::new(0.0, half.y, 0.0);

        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .map(|(sx, sz)| top + orientation * Vec3::new(sx * half.x, 0.0, sz * half.z));
        let bounds = AABB::from_points(corners)
            .map(|aabb| aabb.footprint())
            .unwrap_or_else(|| Rect::from_center_size(top.xz(), size.xz()));

        let resolution = resolution.max(1);
        let cell = bounds.size() / resolution as f32;
        let height_map = HeightMap::from_fn(resolution, |ix, iz| {
            let x = bounds.min.x + ix as f32 * cell.x;
            let z = bounds.min.y + iz as f32 * cell.y;
            if normal.y.abs() < 1e-3 {
                top.y
            } else {
                top.y - (normal.x * (x - top.x) + normal.z * (z - top.z)) / normal.y
            }
        });

        Self {
            position,
            rotation,
            size,
            bounds,
            height_map,
        }
    }

    /// Height of the top face at the plate center
    pub fn center_height(&self) -> f32 {
        let orientation = quat_from_euler(self.rotation);
        (self.position + orientation * Vec3::new(0.0, self.size.y * 0.5, 0.0)).y
    }

    /// Plate thickness
    pub fn thickness(&self) -> f32 {
        self.size.y
    }

    /// Move the plate, carrying its sampled heights along
    pub fn translated(mut self, offset: Vec3) -> Self {
        if offset == Vec3::zeros() {
            return self;
        }
        self.position += offset;
        self.bounds = Rect::new(self.bounds.min + offset.xz(), self.bounds.max + offset.xz());
        if offset.y != 0.0 {
            self.height_map = self.height_map.map_heights(|h| h + offset.y);
        }
        self
    }

    /// Shift every sample so the surface passes through `height` at its center
    pub fn with_center_height(mut self, height: f32) -> Self {
        let delta = height - self.center_height();
        if delta != 0.0 {
            self.height_map = self.height_map.map_heights(|h| h + delta);
        }
        self
    }
}

/// One collider, in coordinates local to a model's canonical pose
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderPrimitive {
    /// Blocks over its full height
    Box {
        /// Center
        position: Vec3,
        /// Euler rotation in radians
        rotation: Vec3,
        /// Half of width, height and depth
        half_extents: Vec3,
    },
    /// Blocks with a circular footprint
    Cylinder {
        /// Center
        position: Vec3,
        /// Euler rotation in radians
        rotation: Vec3,
        /// Footprint radius
        radius: f32,
        /// Total height
        height: f32,
    },
    /// Walkable plate
    Floor(Surface),
    /// Walkable tilted plate
    Ramp(Surface),
}

impl ColliderPrimitive {
    /// Build a collider of `kind` from its absolute dimensions.
    ///
    /// Cylinder dimensions are (diameter, height, diameter); the two diameters
    /// are averaged. Floors and ramps sample their surface at `resolution`.
    pub fn from_dimensions(kind: ShapeKind, position: Vec3, rotation: Vec3, dimensions: Vec3, resolution: usize) -> Self {
        match kind {
            ShapeKind::Box => Self::Box {
                position,
                rotation,
                half_extents: dimensions * 0.5,
            },
            ShapeKind::Cylinder => Self::Cylinder {
                position,
                rotation,
                radius: (dimensions.x + dimensions.z) * 0.25,
                height: dimensions.y,
            },
            ShapeKind::Floor => Self::Floor(Surface::from_plate(position, rotation, dimensions, resolution)),
            ShapeKind::Ramp => Self::Ramp(Surface::from_plate(position, rotation, dimensions, resolution)),
        }
    }

    /// Shape type
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box { .. } => ShapeKind::Box,
            Self::Cylinder { .. } => ShapeKind::Cylinder,
            Self::Floor(_) => ShapeKind::Floor,
            Self::Ramp(_) => ShapeKind::Ramp,
        }
    }

    /// Whether actors can stand on this collider
    pub fn is_walkable(&self) -> bool {
        self.kind().is_walkable()
    }

    /// Center of the collider
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Box { position, .. } | Self::Cylinder { position, .. } => *position,
            Self::Floor(surface) | Self::Ramp(surface) => surface.position,
        }
    }

    /// Euler rotation in radians
    pub fn rotation(&self) -> Vec3 {
        match self {
            Self::Box { rotation, .. } | Self::Cylinder { rotation, .. } => *rotation,
            Self::Floor(surface) | Self::Ramp(surface) => surface.rotation,
        }
    }

    /// Absolute width, height and depth along the collider's own axes
    pub fn dimensions(&self) -> Vec3 {
        match self {
            Self::Box { half_extents, .. } => half_extents * 2.0,
            Self::Cylinder { radius, height, .. } => Vec3::new(radius * 2.0, *height, radius * 2.0),
            Self::Floor(surface) | Self::Ramp(surface) => surface.size,
        }
    }

    /// Walkable surface, if any
    pub fn surface(&self) -> Option<&Surface> {
        match self {
            Self::Floor(surface) | Self::Ramp(surface) => Some(surface),
            _ => None,
        }
    }

    /// Corners of the collider's oriented bounding box
    pub fn corners(&self) -> [Vec3; 8] {
        let orientation = quat_from_euler(self.rotation());
        let center = self.position();
        let half = self.dimensions() * 0.5;
        let mut corners = [Vec3::zeros(); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let sign = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
            let local = Vec3::new(sign(1) * half.x, sign(2) * half.y, sign(4) * half.z);
            *corner = center + orientation * local;
        }
        corners
    }

    /// Axis-aligned bounds of the rotated collider
    pub fn bounds(&self) -> AABB {
        let corners = self.corners();
        AABB::from_points(corners).unwrap_or_else(|| AABB::new(corners[0], corners[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils::deg_to_rad;
    use approx::assert_relative_eq;

    #[test]
    fn test_walkability_follows_kind() {
        let dims = Vec3::new(2.0, 2.0, 2.0);
        for kind in ShapeKind::ALL {
            let collider = ColliderPrimitive::from_dimensions(kind, Vec3::zeros(), Vec3::zeros(), dims, 4);
            assert_eq!(collider.kind(), kind);
            assert_eq!(collider.is_walkable(), matches!(kind, ShapeKind::Floor | ShapeKind::Ramp));
        }
    }

    #[test]
    fn test_flat_floor_surface() {
        let surface = Surface::from_plate(Vec3::new(0.0, 0.9, 0.0), Vec3::zeros(), Vec3::new(4.0, 0.2, 4.0), 4);
        assert_relative_eq!(surface.bounds.min.x, -2.0);
        assert_relative_eq!(surface.bounds.max.y, 2.0);
        for &h in surface.height_map.samples() {
            assert_relative_eq!(h, 1.0, epsilon = 1e-6);
        }
        assert_relative_eq!(surface.center_height(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ramp_surface_slopes_along_z() {
        let angle = deg_to_rad(30.0);
        let surface = Surface::from_plate(Vec3::zeros(), Vec3::new(angle, 0.0, 0.0), Vec3::new(4.0, 0.0, 4.0), 2);
        let map = &surface.height_map;
        // A positive rotation about X lowers the +Z edge
        assert!(map.get(0, 0) > map.get(0, 2));
        assert_relative_eq!(map.get(0, 1), 0.0, epsilon = 1e-5);
        let rise = map.get(1, 0) - map.get(1, 2);
        let run = surface.bounds.size().y;
        assert_relative_eq!(rise / run, angle.tan(), epsilon = 1e-4);
    }

    #[test]
    fn test_center_height_shift() {
        let surface = Surface::from_plate(Vec3::zeros(), Vec3::zeros(), Vec3::new(2.0, 0.2, 2.0), 2)
            .with_center_height(3.0);
        assert_relative_eq!(surface.height_map.get(1, 1), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_translated_surface_keeps_its_shape() {
        let surface = Surface::from_plate(Vec3::zeros(), Vec3::new(0.3, 0.0, 0.0), Vec3::new(2.0, 0.2, 2.0), 2);
        let moved = surface.clone().translated(Vec3::new(1.0, 0.5, -2.0));
        assert_relative_eq!(moved.bounds.min.x, surface.bounds.min.x + 1.0, epsilon = 1e-6);
        assert_relative_eq!(moved.bounds.max.y, surface.bounds.max.y - 2.0, epsilon = 1e-6);
        for (a, b) in surface.height_map.samples().iter().zip(moved.height_map.samples()) {
            assert_relative_eq!(*b, a + 0.5, epsilon = 1e-6);
        }
        assert_eq!(surface.clone().translated(Vec3::zeros()), surface);
    }

    #[test]
    fn test_rotated_box_bounds() {
        let collider = ColliderPrimitive::Box {
            position: Vec3::zeros(),
            rotation: Vec3::new(0.0, deg_to_rad(45.0), 0.0),
            half_extents: Vec3::new(1.0, 1.0, 1.0),
        };
        let bounds = collider.bounds();
        assert_relative_eq!(bounds.max.x, 2f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(bounds.max.y, 1.0, epsilon = 1e-5);
    }
}
