//! The active set of placed colliders

use crate::foundation::math::Vec2;
use crate::placement::PlacedSetup;
use super::collision::{BlockingShape, WorldSpaceCollisionMesh};
use super::floor_zone::FloorZone;

/// Everything the movement resolver tests against
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    blockers: Vec<BlockingShape>,
    floor_zones: Vec<FloorZone>,
    meshes: Vec<WorldSpaceCollisionMesh>,
}

impl ColliderSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every collider of a placed setup
    pub fn register(&mut self, placed: PlacedSetup) {
        log::debug!(
            "Registering '{}': {} blockers, {} floor zones",
            placed.instance,
            placed.blockers.len(),
            placed.floor_zones.len()
        );
        self.blockers.extend(placed.blockers);
        self.floor_zones.extend(placed.floor_zones);
    }

    /// Add one blocking shape
    pub fn add_blocker(&mut self, shape: BlockingShape) {
        self.blockers.push(shape);
    }

    /// Add one floor zone. Zones added earlier win where they overlap.
    pub fn add_floor_zone(&mut self, zone: FloorZone) {
        self.floor_zones.push(zone);
    }

    /// Add a scene mesh for the mesh-precision path
    pub fn add_mesh(&mut self, mesh: WorldSpaceCollisionMesh) {
        self.meshes.push(mesh);
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.blockers.clear();
        self.floor_zones.clear();
        self.meshes.clear();
    }

    /// Blocking shapes
    pub fn blockers(&self) -> &[BlockingShape] {
        &self.blockers
    }

    /// Walkable zones, in lookup order
    pub fn floor_zones(&self) -> &[FloorZone] {
        &self.floor_zones
    }

    /// Registered scene meshes
    pub fn meshes(&self) -> &[WorldSpaceCollisionMesh] {
        &self.meshes
    }

    /// Whether an actor footprint at `center` overlaps any blocker
    pub fn footprint_blocked(&self, center: Vec2, half_width: f32) -> bool {
        self.blockers.iter().any(|shape| shape.blocks_footprint(center, half_width))
    }

    /// First floor zone containing the point
    pub fn floor_zone_at(&self, point: Vec2) -> Option<&FloorZone> {
        self.floor_zones.iter().find(|zone| zone.contains(point))
    }

    /// Sampled floor height at the point, if a zone covers it
    pub fn floor_height(&self, point: Vec2) -> Option<f32> {
        self.floor_zone_at(point).map(|zone| zone.height_at(point))
    }
}
