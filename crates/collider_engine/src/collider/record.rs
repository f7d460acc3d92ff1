//! Persisted record format
//!
//! Records are the JSON shape of a collider: a flat object with a `type` tag,
//! `{x, y, z}` vectors and absolute world dimensions in `scale`. Conversion to
//! [`ColliderPrimitive`] is where field/type mismatches are rejected.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use super::heightmap::HeightMap;
use super::primitive::{ColliderPrimitive, ShapeKind, Surface};
use super::ColliderError;

/// Height map resolution used when a floor or ramp record carries no samples
pub const DEFAULT_HEIGHT_MAP_RESOLUTION: usize = 10;

/// `{x, y, z}` vector as written to disk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Record {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl From<Vec3> for Vec3Record {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(v: Vec3Record) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Serde adapter writing a [`Vec3`] as `{x, y, z}`
pub mod xyz {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Vec3Record;
    use crate::foundation::math::Vec3;

    /// Serialize as an object
    pub fn serialize<S: Serializer>(value: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Vec3Record::from(*value).serialize(serializer)
    }

    /// Deserialize from an object
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        Vec3Record::deserialize(deserializer).map(Vec3::from)
    }
}

/// One collider as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColliderRecord {
    /// Shape tag
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Center
    pub position: Vec3Record,
    /// Euler rotation in radians
    pub rotation: Vec3Record,
    /// Absolute dimensions
    pub scale: Vec3Record,
    /// Must agree with the shape type
    pub is_walkable: bool,
    /// Surface height at the plate center (floor and ramp only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Sampled surface (floor and ramp only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_map: Option<HeightMap>,
}

impl From<&ColliderPrimitive> for ColliderRecord {
    fn from(collider: &ColliderPrimitive) -> Self {
        let surface = collider.surface();
        Self {
            kind: collider.kind(),
            position: collider.position().into(),
            rotation: collider.rotation().into(),
            scale: collider.dimensions().into(),
            is_walkable: collider.is_walkable(),
            height: surface.map(Surface::center_height),
            height_map: surface.map(|s| s.height_map.clone()),
        }
    }
}

impl TryFrom<ColliderRecord> for ColliderPrimitive {
    type Error = ColliderError;

    fn try_from(record: ColliderRecord) -> Result<Self, Self::Error> {
        record.into_primitive(DEFAULT_HEIGHT_MAP_RESOLUTION)
    }
}

fn is_finite(v: &Vec3Record) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

impl ColliderRecord {
    /// Convert to a primitive, regenerating missing floor/ramp surfaces at
    /// `resolution` cells per axis.
    pub fn into_primitive(self, resolution: usize) -> Result<ColliderPrimitive, ColliderError> {
        let kind = self.kind;
        let malformed = |reason: &str| ColliderError::Malformed(format!("{kind} record {reason}"));

        if self.is_walkable != kind.is_walkable() {
            return Err(malformed(if kind.is_walkable() {
                "must be walkable"
            } else {
                "cannot be walkable"
            }));
        }
        if !kind.is_walkable() && self.height.is_some() {
            return Err(malformed("cannot carry a height"));
        }
        if !kind.is_walkable() && self.height_map.is_some() {
            return Err(malformed("cannot carry a height map"));
        }
        if !(is_finite(&self.position) && is_finite(&self.rotation) && is_finite(&self.scale)) {
            return Err(malformed("has non-finite components"));
        }
        let dimensions = Vec3::from(self.scale);
        if dimensions.iter().any(|&d| d < 0.0) {
            return Err(malformed("has negative dimensions"));
        }
        if matches!(self.height, Some(h) if !h.is_finite()) {
            return Err(malformed("has a non-finite height"));
        }

        let position = Vec3::from(self.position);
        let rotation = Vec3::from(self.rotation);
        let collider = match (kind, self.height_map) {
            (ShapeKind::Floor | ShapeKind::Ramp, Some(height_map)) => {
                let mut surface = Surface::from_plate(position, rotation, dimensions, height_map.resolution());
                surface.height_map = height_map;
                if kind == ShapeKind::Floor {
                    ColliderPrimitive::Floor(surface)
                } else {
                    ColliderPrimitive::Ramp(surface)
                }
            }
            _ => {
                let collider = ColliderPrimitive::from_dimensions(kind, position, rotation, dimensions, resolution);
                match (collider, self.height) {
                    (ColliderPrimitive::Floor(s), Some(h)) => ColliderPrimitive::Floor(s.with_center_height(h)),
                    (ColliderPrimitive::Ramp(s), Some(h)) => ColliderPrimitive::Ramp(s.with_center_height(h)),
                    (collider, _) => collider,
                }
            }
        };
        Ok(collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: &str, walkable: bool, extra: &str) -> String {
        format!(
            r#"{{"type":"{kind}","position":{{"x":0,"y":1,"z":0}},"rotation":{{"x":0,"y":0,"z":0}},
                "scale":{{"x":2,"y":3,"z":2}},"isWalkable":{walkable}{extra}}}"#
        )
    }

    #[test]
    fn test_cylinder_record_converts() {
        let rec: ColliderRecord = serde_json::from_str(&record("cylinder", false, "")).unwrap();
        match ColliderPrimitive::try_from(rec).unwrap() {
            ColliderPrimitive::Cylinder { radius, height, .. } => {
                assert_eq!(radius, 1.0);
                assert_eq!(height, 3.0);
            }
            other => panic!("expected cylinder, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_fields_are_malformed() {
        for json in [
            record("cylinder", false, r#","height":1.5"#),
            record("cylinder", true, ""),
            record("box", true, ""),
            record("floor", false, ""),
        ] {
            let rec: ColliderRecord = serde_json::from_str(&json).unwrap();
            assert!(matches!(ColliderPrimitive::try_from(rec), Err(ColliderError::Malformed(_))), "{json}");
        }
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        assert!(serde_json::from_str::<ColliderRecord>(&record("sphere", false, "")).is_err());
    }

    #[test]
    fn test_floor_without_samples_is_regenerated() {
        let rec: ColliderRecord = serde_json::from_str(&record("floor", true, r#","height":2.5"#)).unwrap();
        let collider = rec.into_primitive(4).unwrap();
        let surface = collider.surface().unwrap();
        assert_eq!(surface.height_map.resolution(), 4);
        assert!(surface.height_map.samples().iter().all(|&h| (h - 2.5).abs() < 1e-6));
    }

    #[test]
    fn test_record_field_names() {
        let collider = ColliderPrimitive::from_dimensions(
            ShapeKind::Floor,
            Vec3::zeros(),
            Vec3::zeros(),
            Vec3::new(4.0, 0.2, 4.0),
            1,
        );
        let json = serde_json::to_value(ColliderRecord::from(&collider)).unwrap();
        assert_eq!(json["type"], "floor");
        assert_eq!(json["isWalkable"], true);
        assert_eq!(json["heightMap"]["resolution"], 1);
        assert!(json["scale"]["x"].is_number());
    }
}
