//! Placement transform
//!
//! Maps colliders from a model's canonical pose into the world for one
//! instance, and back. The same path serves hand-authored and decomposed
//! colliders:
//!
//! ```text
//! world.x = instance.x + local.x * scale.x
//! world.z = instance.z + local.z * scale.z
//! world.y = instance.y + local.y * scale.y - ground_snap_offset
//! ```
//!
//! Instance rotation is not applied.

use crate::collider::{ColliderPrimitive, CollisionSetup, RegisteredModel, Surface};
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::collision::{BlockingShape, Rect, AABB};
use crate::physics::{FloorZone, SurfaceKind};

/// Where one model instance sits in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Instance origin
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Subtracted from every placed Y
    pub ground_snap_offset: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl From<&RegisteredModel> for Placement {
    fn from(model: &RegisteredModel) -> Self {
        Self::new(model.position, model.scale).with_ground_snap_offset(model.ground_snap_offset)
    }
}

/// A collider after placement
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedCollider {
    /// Box or cylinder
    Blocker(BlockingShape),
    /// Floor or ramp
    Floor(FloorZone),
}

/// Every collider of one instance, in world space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedSetup {
    /// Name of the instance the colliders were placed for
    pub instance: String,
    /// Blocking shapes
    pub blockers: Vec<BlockingShape>,
    /// Walkable zones
    pub floor_zones: Vec<FloorZone>,
}

impl PlacedSetup {
    /// Total number of placed colliders
    pub fn len(&self) -> usize {
        self.blockers.len() + self.floor_zones.len()
    }

    /// Whether nothing was placed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Placement {
    /// Placement without ground snapping
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ground_snap_offset: 0.0,
        }
    }

    /// Set the ground snap offset
    pub fn with_ground_snap_offset(mut self, offset: f32) -> Self {
        self.ground_snap_offset = offset;
        self
    }

    /// Local point to world
    pub fn place_point(&self, local: Vec3) -> Vec3 {
        Vec3::new(
            self.position.x + local.x * self.scale.x,
            self.position.y + local.y * self.scale.y - self.ground_snap_offset,
            self.position.z + local.z * self.scale.z,
        )
    }

    /// World point to local
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        Vec3::new(
            (world.x - self.position.x) / self.scale.x,
            (world.y - self.position.y + self.ground_snap_offset) / self.scale.y,
            (world.z - self.position.z) / self.scale.z,
        )
    }

    /// Local height to world
    pub fn place_height(&self, height: f32) -> f32 {
        self.position.y + height * self.scale.y - self.ground_snap_offset
    }

    /// World height to local
    pub fn local_height(&self, height: f32) -> f32 {
        (height - self.position.y + self.ground_snap_offset) / self.scale.y
    }

    fn place_rect(&self, rect: &Rect) -> Rect {
        let a = self.place_point(Vec3::new(rect.min.x, 0.0, rect.min.y));
        let b = self.place_point(Vec3::new(rect.max.x, 0.0, rect.max.y));
        Rect::new(Vec2::new(a.x.min(b.x), a.z.min(b.z)), Vec2::new(a.x.max(b.x), a.z.max(b.z)))
    }

    fn local_rect(&self, rect: &Rect) -> Rect {
        let a = self.to_local(Vec3::new(rect.min.x, 0.0, rect.min.y));
        let b = self.to_local(Vec3::new(rect.max.x, 0.0, rect.max.y));
        Rect::new(Vec2::new(a.x.min(b.x), a.z.min(b.z)), Vec2::new(a.x.max(b.x), a.z.max(b.z)))
    }

    /// Place one collider
    pub fn place_collider(&self, collider: &ColliderPrimitive) -> PlacedCollider {
        match collider {
            ColliderPrimitive::Box { .. } => {
                let corners = collider.corners().map(|corner| self.place_point(corner));
                let aabb = AABB::from_points(corners).unwrap_or_else(|| AABB::new(corners[0], corners[0]));
                PlacedCollider::Blocker(BlockingShape::Box(aabb))
            }
            ColliderPrimitive::Cylinder { position, radius, height, .. } => {
                let center = self.place_point(*position);
                let height = height * self.scale.y;
                PlacedCollider::Blocker(BlockingShape::Cylinder {
                    center: Vec2::new(center.x, center.z),
                    radius: radius * self.scale.x.max(self.scale.z),
                    base_y: center.y - height * 0.5,
                    height,
                })
            }
            ColliderPrimitive::Floor(surface) => PlacedCollider::Floor(self.place_surface(surface, SurfaceKind::Floor)),
            ColliderPrimitive::Ramp(surface) => PlacedCollider::Floor(self.place_surface(surface, SurfaceKind::Ramp)),
        }
    }

    fn place_surface(&self, surface: &Surface, kind: SurfaceKind) -> FloorZone {
        FloorZone::new(
            self.place_rect(&surface.bounds),
            surface.height_map.map_heights(|h| self.place_height(h)),
            kind,
        )
    }

    /// Place every collider of a setup
    pub fn place_setup(&self, instance: impl Into<String>, setup: &CollisionSetup) -> PlacedSetup {
        let mut placed = PlacedSetup {
            instance: instance.into(),
            ..Default::default()
        };
        for collider in &setup.colliders {
            match self.place_collider(collider) {
                PlacedCollider::Blocker(shape) => placed.blockers.push(shape),
                PlacedCollider::Floor(zone) => placed.floor_zones.push(zone),
            }
        }
        placed
    }

    /// Re-express a world-space collider relative to this placement
    pub fn collider_to_local(&self, collider: &ColliderPrimitive) -> ColliderPrimitive {
        match collider {
            ColliderPrimitive::Box { position, rotation, half_extents } => ColliderPrimitive::Box {
                position: self.to_local(*position),
                rotation: *rotation,
                half_extents: half_extents.component_div(&self.scale),
            },
            ColliderPrimitive::Cylinder { position, rotation, radius, height } => ColliderPrimitive::Cylinder {
                position: self.to_local(*position),
                rotation: *rotation,
                radius: radius / self.scale.x.max(self.scale.z),
                height: height / self.scale.y,
            },
            ColliderPrimitive::Floor(surface) => ColliderPrimitive::Floor(self.surface_to_local(surface)),
            ColliderPrimitive::Ramp(surface) => ColliderPrimitive::Ramp(self.surface_to_local(surface)),
        }
    }

    fn surface_to_local(&self, surface: &Surface) -> Surface {
        Surface {
            position: self.to_local(surface.position),
            rotation: surface.rotation,
            size: surface.size.component_div(&self.scale),
            bounds: self.local_rect(&surface.bounds),
            height_map: surface.height_map.map_heights(|h| self.local_height(h)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ShapeKind;
    use approx::assert_relative_eq;

    fn unit_box() -> ColliderPrimitive {
        ColliderPrimitive::Box {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Vec3::zeros(),
            half_extents: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    #[test]
    fn test_point_formula_and_inverse() {
        let placement = Placement::new(Vec3::new(10.0, 2.0, -4.0), Vec3::new(2.0, 3.0, 0.5)).with_ground_snap_offset(0.25);
        let local = Vec3::new(1.0, 1.0, 2.0);
        let world = placement.place_point(local);
        assert_relative_eq!(world, Vec3::new(12.0, 4.75, -3.0));
        assert_relative_eq!(placement.to_local(world), local, epsilon = 1e-6);
    }

    #[test]
    fn test_same_setup_is_consistent_across_instances() {
        let setup = CollisionSetup::new("crate.obj", vec![unit_box()]);
        let a = Placement::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(1.0, 1.0, 1.0)).place_setup("a", &setup);
        let b = Placement::new(Vec3::new(-20.0, 3.0, 7.0), Vec3::new(1.0, 1.0, 1.0)).place_setup("b", &setup);
        let (BlockingShape::Box(box_a), BlockingShape::Box(box_b)) = (a.blockers[0], b.blockers[0]) else {
            panic!("expected boxes");
        };
        assert_relative_eq!(box_a.min - Vec3::new(5.0, 0.0, 5.0), box_b.min - Vec3::new(-20.0, 3.0, 7.0));
        assert_relative_eq!(box_a.max - Vec3::new(5.0, 0.0, 5.0), box_b.max - Vec3::new(-20.0, 3.0, 7.0));
    }

    #[test]
    fn test_scaled_instances_agree_in_local_terms() {
        let setup = CollisionSetup::new("crate.obj", vec![unit_box()]);
        let instances = [
            RegisteredModel::new("small", "crate.obj", Vec3::new(5.0, 0.0, 5.0))
                .with_scale(Vec3::new(2.0, 3.0, 0.5))
                .with_ground_snap_offset(0.25),
            RegisteredModel::new("large", "crate.obj", Vec3::new(-20.0, 3.0, 7.0))
                .with_scale(Vec3::new(4.0, 0.5, 1.5))
                .with_ground_snap_offset(1.0),
        ];
        for model in &instances {
            let placement = Placement::from(model);
            let placed = placement.place_setup(model.name.clone(), &setup);
            let BlockingShape::Box(aabb) = placed.blockers[0] else {
                panic!("expected box");
            };
            let origin = model.position - Vec3::new(0.0, model.ground_snap_offset, 0.0);
            assert_relative_eq!((aabb.min - origin).component_div(&model.scale), Vec3::new(-1.0, 0.0, -1.0), epsilon = 1e-5);
            assert_relative_eq!((aabb.max - origin).component_div(&model.scale), Vec3::new(1.0, 2.0, 1.0), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_cylinder_radius_uses_larger_horizontal_scale() {
        let cylinder = ColliderPrimitive::Cylinder {
            position: Vec3::new(0.0, 1.5, 0.0),
            rotation: Vec3::zeros(),
            radius: 1.0,
            height: 3.0,
        };
        let placement = Placement::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 3.0));
        match placement.place_collider(&cylinder) {
            PlacedCollider::Blocker(BlockingShape::Cylinder { radius, height, base_y, .. }) => {
                assert_eq!(radius, 3.0);
                assert_eq!(height, 6.0);
                assert_eq!(base_y, 0.0);
            }
            other => panic!("expected cylinder, got {other:?}"),
        }
    }

    #[test]
    fn test_floor_heights_and_bounds_are_placed() {
        let floor = ColliderPrimitive::from_dimensions(
            ShapeKind::Floor,
            Vec3::new(0.0, 0.9, 0.0),
            Vec3::zeros(),
            Vec3::new(4.0, 0.2, 4.0),
            4,
        );
        let placement = Placement::new(Vec3::new(1.0, 2.0, 1.0), Vec3::new(2.0, 2.0, 2.0)).with_ground_snap_offset(0.5);
        let PlacedCollider::Floor(zone) = placement.place_collider(&floor) else {
            panic!("expected floor zone");
        };
        assert_eq!(zone.kind, SurfaceKind::Floor);
        assert_relative_eq!(zone.bounds.min, Vec2::new(-3.0, -3.0));
        assert_relative_eq!(zone.bounds.max, Vec2::new(5.0, 5.0));
        // 2 + 1.0 * 2 - 0.5
        assert_relative_eq!(zone.height_at(Vec2::new(1.0, 1.0)), 3.5, epsilon = 1e-5);
    }

    #[test]
    fn test_collider_to_local_inverts_placement() {
        let placement = Placement::new(Vec3::new(3.0, 1.0, -2.0), Vec3::new(2.0, 2.0, 2.0));
        let local = placement.collider_to_local(&unit_box());
        match local {
            ColliderPrimitive::Box { position, half_extents, .. } => {
                assert_relative_eq!(position, Vec3::new(-1.5, 0.0, 1.0));
                assert_relative_eq!(half_extents, Vec3::new(0.5, 0.5, 0.5));
            }
            other => panic!("expected box, got {other:?}"),
        }
    }
}
