//! Per-model collision setups

use serde::{Deserialize, Serialize};

use super::primitive::ColliderPrimitive;
use super::record::ColliderRecord;
use super::ColliderError;

/// Every collider authored or decomposed for one model, in canonical-pose
/// coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CollisionSetupRecord", into = "CollisionSetupRecord")]
pub struct CollisionSetup {
    /// Path of the model the colliders belong to
    pub model_path: String,
    /// Colliders of the model
    pub colliders: Vec<ColliderPrimitive>,
}

impl CollisionSetup {
    /// Create a setup for a model
    pub fn new(model_path: impl Into<String>, colliders: Vec<ColliderPrimitive>) -> Self {
        Self {
            model_path: model_path.into(),
            colliders,
        }
    }

    /// Setup without colliders
    pub fn empty(model_path: impl Into<String>) -> Self {
        Self::new(model_path, Vec::new())
    }

    /// Whether the setup has no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Walkable colliders of the setup
    pub fn walkable(&self) -> impl Iterator<Item = &ColliderPrimitive> {
        self.colliders.iter().filter(|c| c.is_walkable())
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON. Field/type mismatches surface as errors.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Wire shape of a [`CollisionSetup`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionSetupRecord {
    /// Path of the model
    pub model_path: String,
    /// Collider records
    pub colliders: Vec<ColliderRecord>,
}

impl From<CollisionSetup> for CollisionSetupRecord {
    fn from(setup: CollisionSetup) -> Self {
        Self {
            model_path: setup.model_path,
            colliders: setup.colliders.iter().map(ColliderRecord::from).collect(),
        }
    }
}

impl TryFrom<CollisionSetupRecord> for CollisionSetup {
    type Error = ColliderError;

    fn try_from(record: CollisionSetupRecord) -> Result<Self, Self::Error> {
        let colliders = record
            .colliders
            .into_iter()
            .enumerate()
            .map(|(index, rec)| {
                ColliderPrimitive::try_from(rec).map_err(|e| match e {
                    ColliderError::Malformed(reason) => ColliderError::Malformed(format!("collider {index}: {reason}")),
                    other => ColliderError::Malformed(format!("collider {index}: {other}")),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            model_path: record.model_path,
            colliders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ShapeKind;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_json_round_trip_keeps_height_map_exactly() {
        let ramp = ColliderPrimitive::from_dimensions(
            ShapeKind::Ramp,
            Vec3::new(0.3, 0.7, -1.1),
            Vec3::new(0.523_598_8, 0.0, 0.0),
            Vec3::new(4.0, 0.2, 4.0),
            7,
        );
        let setup = CollisionSetup::new("models/stairs.obj", vec![ramp.clone()]);
        let back = CollisionSetup::from_json(&setup.to_json().unwrap()).unwrap();
        assert_eq!(back.model_path, "models/stairs.obj");
        assert_eq!(
            back.colliders[0].surface().unwrap().height_map,
            ramp.surface().unwrap().height_map
        );
    }

    #[test]
    fn test_bad_collider_rejects_whole_setup() {
        let json = r#"{"modelPath":"m.obj","colliders":[
            {"type":"cylinder","position":{"x":0,"y":0,"z":0},"rotation":{"x":0,"y":0,"z":0},
             "scale":{"x":1,"y":1,"z":1},"isWalkable":false,"height":2.0}]}"#;
        let err = CollisionSetup::from_json(json).unwrap_err();
        assert!(err.to_string().contains("collider 0"));
    }
}
