//! World-space blocking shapes
//!
//! Placed Box and Cylinder colliders reduced to what the movement resolver
//! needs: an XZ footprint that blocks at every height.

use crate::foundation::math::{Vec2, Vec3};
use super::primitives::{AABB, Ray, Rect};

/// A placed, non-walkable collider in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockingShape {
    /// Axis-aligned box; blocks over its full height
    Box(AABB),
    /// Upright cylinder; blocks with its circular footprint at any height
    Cylinder {
        /// Center of the footprint on the XZ plane
        center: Vec2,
        /// Footprint radius
        radius: f32,
        /// Lowest point of the cylinder
        base_y: f32,
        /// Height of the cylinder
        height: f32,
    },
}

impl BlockingShape {
    /// Whether an actor footprint centered at `center` with half-width
    /// `half_width` overlaps this shape. Touching does not block.
    ///
    /// Boxes are tested against the actor's square footprint, cylinders
    /// against its circular footprint.
    pub fn blocks_footprint(&self, center: Vec2, half_width: f32) -> bool {
        match self {
            Self::Box(aabb) => {
                let actor = Rect::from_center_size(center, Vec2::new(half_width * 2.0, half_width * 2.0));
                actor.overlaps(&aabb.footprint())
            }
            Self::Cylinder { center: cylinder_center, radius, .. } => {
                let reach = radius + half_width;
                (center - cylinder_center).magnitude_squared() < reach * reach
            }
        }
    }

    /// Bounding box of the shape
    pub fn bounds(&self) -> AABB {
        match *self {
            Self::Box(aabb) => aabb,
            Self::Cylinder { center, radius, base_y, height } => AABB::new(
                Vec3::new(center.x - radius, base_y, center.y - radius),
                Vec3::new(center.x + radius, base_y + height, center.y + radius),
            ),
        }
    }

    /// Distance along `ray` to the shape's bounding box
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        self.bounds().intersect_ray(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_blocks_without_margin() {
        let shape = BlockingShape::Box(AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)));
        assert!(!shape.blocks_footprint(Vec2::new(-1.5, 0.0), 0.34));
        assert!(shape.blocks_footprint(Vec2::new(-1.3, 0.0), 0.34));
        // Beside the box along Z, no overlap
        assert!(!shape.blocks_footprint(Vec2::new(0.0, 1.5), 0.34));
    }

    #[test]
    fn test_cylinder_blocks_by_circle() {
        let shape = BlockingShape::Cylinder {
            center: Vec2::new(0.0, 0.0),
            radius: 1.0,
            base_y: 0.0,
            height: 3.0,
        };
        assert!(shape.blocks_footprint(Vec2::new(1.2, 0.0), 0.34));
        assert!(!shape.blocks_footprint(Vec2::new(1.4, 0.0), 0.34));
        // Diagonal just outside the circle but inside its bounding square
        assert!(!shape.blocks_footprint(Vec2::new(1.0, 1.0), 0.34));
    }
}
