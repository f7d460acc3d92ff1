//! Pillar detection
//!
//! Reserved: round vertical structures are currently left to wall
//! detection or hand authoring, so nothing is emitted here.

use crate::assets::MeshGeometry;
use crate::collider::ColliderPrimitive;
use crate::core::config::DecompositionConfig;
use super::classify::Layer;

/// Cylinders for pillar-like geometry. Always empty for now.
pub fn find_pillars(_mesh: &MeshGeometry, _layers: &[Layer], _config: &DecompositionConfig) -> Vec<ColliderPrimitive> {
    Vec::new()
}
