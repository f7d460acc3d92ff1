//! Face classification and layer slicing

use std::collections::BTreeSet;

use crate::assets::MeshGeometry;
use crate::core::config::DecompositionConfig;
use crate::foundation::math::{utils::round_to_tenth, Vec3};

/// Orientation class of a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceClass {
    /// Walkable candidate
    Horizontal,
    /// Wall candidate
    Vertical,
    /// Neither; ignored
    Excluded,
}

/// Classify by `|normal.y|` rounded to one decimal.
///
/// A 45° face has `|normal.y| ≈ 0.707`, which rounds to 0.7 and is excluded.
pub fn classify_normal(normal: Vec3, config: &DecompositionConfig) -> FaceClass {
    let ny = round_to_tenth(normal.y.abs());
    if ny > config.horizontal_threshold {
        FaceClass::Horizontal
    } else if ny < config.vertical_threshold {
        FaceClass::Vertical
    } else {
        FaceClass::Excluded
    }
}

/// One horizontal slab of the mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Position from the bottom
    pub index: usize,
    /// Bottom of the slab
    pub min_y: f32,
    /// Top of the slab
    pub max_y: f32,
    /// Horizontal faces touching the slab
    pub horizontal: BTreeSet<usize>,
    /// Vertical faces touching the slab
    pub vertical: BTreeSet<usize>,
}

/// Cut the mesh's Y extent into slabs and sort the classified faces into
/// every slab their Y range touches. A flat mesh gets a single layer.
pub fn slice_layers(mesh: &MeshGeometry, config: &DecompositionConfig) -> Vec<Layer> {
    let min_y = mesh.bounds.min.y;
    let extent = mesh.bounds.max.y - min_y;
    let count = if extent <= f32::EPSILON { 1 } else { config.layer_count.max(1) };
    let thickness = extent / count as f32;

    let mut layers: Vec<Layer> = (0..count)
        .map(|index| Layer {
            index,
            min_y: min_y + index as f32 * thickness,
            max_y: min_y + (index + 1) as f32 * thickness,
            horizontal: BTreeSet::new(),
            vertical: BTreeSet::new(),
        })
        .collect();

    for (face, triangle) in mesh.triangles() {
        let class = classify_normal(mesh.averaged_normal(face), config);
        if class == FaceClass::Excluded {
            continue;
        }
        let (low, high) = triangle.y_range();
        for layer in layers.iter_mut().filter(|layer| low <= layer.max_y && high >= layer.min_y) {
            match class {
                FaceClass::Horizontal => layer.horizontal.insert(face),
                FaceClass::Vertical => layer.vertical.insert(face),
                FaceClass::Excluded => false,
            };
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_thresholds() {
        let config = DecompositionConfig::default();
        assert_eq!(classify_normal(Vec3::new(0.0, 1.0, 0.0), &config), FaceClass::Horizontal);
        assert_eq!(classify_normal(Vec3::new(0.0, -1.0, 0.0), &config), FaceClass::Horizontal);
        assert_eq!(classify_normal(Vec3::new(1.0, 0.0, 0.0), &config), FaceClass::Vertical);
        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_eq!(classify_normal(diagonal, &config), FaceClass::Excluded);
    }

    #[test]
    fn test_faces_land_in_touched_layers() {
        // One floor at y=0 and one wall spanning y 0..2
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let mesh = MeshGeometry::new(positions, Vec::new(), vec![0, 2, 1, 3, 4, 5]);
        let layers = slice_layers(&mesh, &DecompositionConfig::default().with_layer_count(4));
        assert_eq!(layers.len(), 4);
        assert!(layers[0].horizontal.contains(&0));
        assert!(!layers[1].horizontal.contains(&0));
        assert!(layers.iter().all(|layer| layer.vertical.contains(&1)));
    }
}
