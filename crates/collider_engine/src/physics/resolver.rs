//! Runtime movement resolution
//!
//! Each step an actor asks to move by `(dx, dz)`. X and Z are tested
//! separately against the [`ColliderSet`], so an actor pressed against a
//! wall still slides along it. The ground height under the final position is
//! then eased toward rather than jumped to.

use crate::core::config::ResolverConfig;
use crate::foundation::math::{Vec2, Vec3};
use super::collider_set::ColliderSet;
use super::collision::CollisionMeshTemplate;

/// A moving character as the resolver sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Feet position; Y is the current ground height
    pub position: Vec3,
    /// Half-width of the footprint
    pub radius: f32,
    /// Added to sampled floor heights
    pub collision_height_offset: f32,
}

impl Actor {
    /// Actor at `position` using the configured footprint and offset
    pub fn new(position: Vec3, config: &ResolverConfig) -> Self {
        Self {
            position,
            radius: config.actor_radius,
            collision_height_offset: config.collision_height_offset,
        }
    }
}

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// X movement actually applied
    pub applied_dx: f32,
    /// Z movement actually applied
    pub applied_dz: f32,
    /// Eased ground height after the step
    pub new_y: f32,
    /// Whether the X move was accepted
    pub can_move_x: bool,
    /// Whether the Z move was accepted
    pub can_move_z: bool,
}

impl MoveOutcome {
    /// Actor position after applying the outcome
    pub fn apply(&self, position: Vec3) -> Vec3 {
        Vec3::new(position.x + self.applied_dx, self.new_y, position.z + self.applied_dz)
    }
}

/// Resolves actor movement against a collider set
#[derive(Debug, Clone)]
pub struct MovementResolver {
    config: ResolverConfig,
    proxy: CollisionMeshTemplate,
}

impl MovementResolver {
    /// Create a resolver. The mesh proxy box is built once here.
    pub fn new(config: ResolverConfig) -> Self {
        let proxy = CollisionMeshTemplate::cuboid(Vec3::new(
            config.actor_radius,
            config.proxy_height * 0.5,
            config.actor_radius,
        ));
        Self { config, proxy }
    }

    /// Resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Actor at `position` with this resolver's footprint
    pub fn actor_at(&self, position: Vec3) -> Actor {
        Actor::new(position, &self.config)
    }

    /// Move `actor` by `(dx, dz)` against `colliders`
    pub fn resolve(&self, colliders: &ColliderSet, actor: &Actor, dx: f32, dz: f32) -> MoveOutcome {
        let origin = actor.position;

        let can_move_x = dx == 0.0 || !self.blocked(colliders, actor, Vec3::new(origin.x + dx, origin.y, origin.z));
        let can_move_z = dz == 0.0 || !self.blocked(colliders, actor, Vec3::new(origin.x, origin.y, origin.z + dz));

        let applied_dx = if can_move_x { dx } else { 0.0 };
        let applied_dz = if can_move_z { dz } else { 0.0 };
        if !(can_move_x && can_move_z) {
            log::trace!("Movement blocked at {origin:?}: x={can_move_x} z={can_move_z}");
        }

        let target = self.ground_height(colliders, actor, Vec2::new(origin.x + applied_dx, origin.z + applied_dz));
        MoveOutcome {
            applied_dx,
            applied_dz,
            new_y: self.ease_height(origin.y, target),
            can_move_x,
            can_move_z,
        }
    }

    /// Height an actor should rest at on `point`, before easing
    pub fn ground_height(&self, colliders: &ColliderSet, actor: &Actor, point: Vec2) -> f32 {
        match colliders.floor_height(point) {
            Some(height) => height + actor.collision_height_offset,
            None => self.config.default_ground_height,
        }
    }

    /// Step `current` toward `target` by at most the configured rise or fall
    pub fn ease_height(&self, current: f32, target: f32) -> f32 {
        let diff = target - current;
        if diff.abs() <= self.config.snap_threshold {
            target
        } else if diff > 0.0 {
            if diff <= self.config.max_rise_per_step {
                target
            } else {
                current + self.config.max_rise_per_step
            }
        } else if -diff <= self.config.max_fall_per_step {
            target
        } else {
            current - self.config.max_fall_per_step
        }
    }

    fn blocked(&self, colliders: &ColliderSet, actor: &Actor, proposed: Vec3) -> bool {
        if colliders.footprint_blocked(Vec2::new(proposed.x, proposed.z), actor.radius) {
            return true;
        }
        if !self.config.use_mesh_collision || colliders.meshes().is_empty() {
            return false;
        }

        // The proxy floats one rise step above the feet so walkable steps do not block
        let lift = self.config.max_rise_per_step + self.config.proxy_height * 0.5;
        let proxy = self.proxy.translated(proposed + Vec3::new(0.0, lift, 0.0));
        colliders.meshes().iter().any(|mesh| proxy.intersects_mesh(mesh))
    }
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::HeightMap;
    use crate::physics::collision::{BlockingShape, Rect, AABB};
    use crate::physics::{FloorZone, SurfaceKind};
    use approx::assert_relative_eq;

    fn wall_set() -> ColliderSet {
        let mut set = ColliderSet::new();
        set.add_blocker(BlockingShape::Box(AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0))));
        set
    }

    #[test]
    fn test_x_move_blocked_by_box() {
        let resolver = MovementResolver::default();
        let set = wall_set();
        let actor = resolver.actor_at(Vec3::new(-2.0, 0.0, 0.0));

        // -1.5 + 0.34 stays clear of the face at -1
        let clear = resolver.resolve(&set, &actor, 0.5, 0.0);
        assert!(clear.can_move_x);
        assert_relative_eq!(clear.applied_dx, 0.5);

        // -1.3 + 0.34 crosses it
        let blocked = resolver.resolve(&set, &actor, 0.7, 0.0);
        assert!(!blocked.can_move_x);
        assert_eq!(blocked.applied_dx, 0.0);
    }

    #[test]
    fn test_axes_resolve_independently() {
        let resolver = MovementResolver::default();
        let set = wall_set();
        let actor = resolver.actor_at(Vec3::new(-2.0, 0.0, 0.0));
        let outcome = resolver.resolve(&set, &actor, 0.9, 0.4);
        assert!(!outcome.can_move_x);
        assert!(outcome.can_move_z);
        assert_relative_eq!(outcome.applied_dz, 0.4);
    }

    #[test]
    fn test_ground_from_floor_zone_or_default() {
        let resolver = MovementResolver::new(ResolverConfig::new().with_default_ground_height(-1.0).with_collision_height_offset(0.05));
        let mut set = ColliderSet::new();
        set.add_floor_zone(FloorZone::new(
            Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)),
            HeightMap::flat(2, 1.0),
            SurfaceKind::Floor,
        ));
        let actor = resolver.actor_at(Vec3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(resolver.ground_height(&set, &actor, Vec2::new(1.0, 1.0)), 1.05, epsilon = 1e-6);
        assert_relative_eq!(resolver.ground_height(&set, &actor, Vec2::new(5.0, 1.0)), -1.0);
    }

    #[test]
    fn test_height_easing_limits() {
        let resolver = MovementResolver::default();
        let fall = resolver.ease_height(1.0, 0.0);
        assert_relative_eq!(fall, 0.8, epsilon = 1e-6);
        let rise = resolver.ease_height(0.0, 1.0);
        assert_relative_eq!(rise, 0.3, epsilon = 1e-6);
        assert_eq!(resolver.ease_height(0.995, 1.0), 1.0);

        // Falling never passes the target
        let mut y = 1.0;
        for _ in 0..10 {
            y = resolver.ease_height(y, 0.5);
            assert!(y >= 0.5);
        }
        assert_eq!(y, 0.5);
    }

    #[test]
    fn test_cylinder_blocks_but_gives_no_height() {
        let resolver = MovementResolver::default();
        let mut set = ColliderSet::new();
        set.add_blocker(BlockingShape::Cylinder {
            center: Vec2::new(0.0, 0.0),
            radius: 1.0,
            base_y: 0.0,
            height: 3.0,
        });
        let actor = resolver.actor_at(Vec3::new(-2.0, 0.0, 0.0));
        let outcome = resolver.resolve(&set, &actor, 0.8, 0.0);
        assert!(!outcome.can_move_x);
        assert_eq!(outcome.new_y, 0.0);
    }

    #[test]
    fn test_mesh_path_blocks_against_scene_mesh() {
        let resolver = MovementResolver::new(ResolverConfig::new().with_mesh_collision(true));
        let mut set = ColliderSet::new();
        set.add_mesh(CollisionMeshTemplate::cuboid(Vec3::new(0.5, 1.0, 0.5)).translated(Vec3::new(0.0, 1.0, 0.0)));
        let actor = resolver.actor_at(Vec3::new(-2.0, 0.0, 0.0));
        assert!(resolver.resolve(&set, &actor, 0.5, 0.0).can_move_x);
        assert!(!resolver.resolve(&set, &actor, 1.5, 0.0).can_move_x);
    }
}
