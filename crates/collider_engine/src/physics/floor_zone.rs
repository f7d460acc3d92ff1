//! Walkable height zones

use crate::collider::HeightMap;
use crate::foundation::math::Vec2;
use super::collision::Rect;

/// Collider type a floor zone was placed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Flat plate
    Floor,
    /// Tilted plate
    Ramp,
}

/// World-space rectangle with a height grid stretched over it
#[derive(Debug, Clone, PartialEq)]
pub struct FloorZone {
    /// XZ extent
    pub bounds: Rect,
    /// Heights over `bounds`
    pub height_map: HeightMap,
    /// Source collider type
    pub kind: SurfaceKind,
}

impl FloorZone {
    /// Create a zone
    pub fn new(bounds: Rect, height_map: HeightMap, kind: SurfaceKind) -> Self {
        Self { bounds, height_map, kind }
    }

    /// Cells per axis
    pub fn resolution(&self) -> usize {
        self.height_map.resolution()
    }

    /// Size of one grid cell along X and Z
    pub fn cell_size(&self) -> Vec2 {
        self.bounds.size() / self.resolution() as f32
    }

    /// Whether the point lies inside the zone, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds.contains(point)
    }

    /// Grid coordinates of the sample a point reads, clamped to the grid
    pub fn sample_index(&self, point: Vec2) -> (usize, usize) {
        let cell = self.cell_size();
        let res = self.resolution();
        let axis = |offset: f32, size: f32| -> usize {
            if size <= f32::EPSILON {
                return 0;
            }
            let index = (offset / size).floor();
            if index <= 0.0 {
                0
            } else {
                (index as usize).min(res)
            }
        };
        (
            axis(point.x - self.bounds.min.x, cell.x),
            axis(point.y - self.bounds.min.y, cell.y),
        )
    }

    /// Height of the sample covering `point`. Points outside the zone read
    /// the nearest edge sample.
    pub fn height_at(&self, point: Vec2) -> f32 {
        let (ix, iz) = self.sample_index(point);
        self.height_map.get(ix, iz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> FloorZone {
        let map = HeightMap::from_fn(4, |ix, iz| ix as f32 + iz as f32 * 10.0);
        FloorZone::new(Rect::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 8.0)), map, SurfaceKind::Floor)
    }

    #[test]
    fn test_sample_index_uses_cell_size() {
        let zone = zone();
        assert_eq!(zone.cell_size(), Vec2::new(1.0, 2.0));
        assert_eq!(zone.sample_index(Vec2::new(1.5, 4.5)), (1, 2));
        assert_eq!(zone.height_at(Vec2::new(1.5, 4.5)), 21.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let zone = zone();
        assert_eq!(zone.sample_index(Vec2::new(-3.0, 100.0)), (0, 4));
        assert_eq!(zone.sample_index(Vec2::new(4.0, 8.0)), (4, 4));
        assert_eq!(zone.height_at(Vec2::new(50.0, -1.0)), 4.0);
    }
}
