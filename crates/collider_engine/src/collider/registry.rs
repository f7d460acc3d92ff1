//! Model instances placed in a scene

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use super::record::xyz;

/// A model instance: which file, and where it sits in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredModel {
    /// Unique instance name, also the collision store key
    pub name: String,
    /// Path of the model file
    pub path: String,
    /// World position of the instance origin
    #[serde(with = "xyz")]
    pub position: Vec3,
    /// Euler rotation in radians
    #[serde(with = "xyz", default = "Vec3::zeros")]
    pub rotation: Vec3,
    /// Per-axis scale
    #[serde(with = "xyz", default = "unit_scale")]
    pub scale: Vec3,
    /// How far this instance was lowered to rest on the ground; subtracted
    /// from every placed Y
    #[serde(default)]
    pub ground_snap_offset: f32,
}

fn unit_scale() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

impl RegisteredModel {
    /// Instance at `position` with no rotation and unit scale
    pub fn new(name: impl Into<String>, path: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            position,
            rotation: Vec3::zeros(),
            scale: unit_scale(),
            ground_snap_offset: 0.0,
        }
    }

    /// Set the instance scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the ground snap offset of this instance
    pub fn with_ground_snap_offset(mut self, offset: f32) -> Self {
        self.ground_snap_offset = offset;
        self
    }

    /// Set the instance rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Model instances of a scene, keyed by name
///
/// Owned by whoever builds the scene and handed out by reference.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, RegisteredModel>,
}

impl ModelRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a model, returning the one it replaced
    pub fn register(&mut self, model: RegisteredModel) -> Option<RegisteredModel> {
        log::debug!("Registering model '{}' from {}", model.name, model.path);
        self.models.insert(model.name.clone(), model)
    }

    /// Remove a model by name
    pub fn unregister(&mut self, name: &str) -> Option<RegisteredModel> {
        self.models.remove(name)
    }

    /// Look a model up by name
    pub fn get(&self, name: &str) -> Option<&RegisteredModel> {
        self.models.get(name)
    }

    /// Models in name order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.values()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<RegisteredModel> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = RegisteredModel>>(iter: I) -> Self {
        let mut registry = Self::new();
        for model in iter {
            registry.register(model);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = ModelRegistry::new();
        assert!(registry.register(RegisteredModel::new("house", "a.obj", Vec3::zeros())).is_none());
        let old = registry.register(RegisteredModel::new("house", "b.obj", Vec3::zeros()));
        assert_eq!(old.unwrap().path, "a.obj");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("house").unwrap().path, "b.obj");
    }

    #[test]
    fn test_model_json_defaults() {
        let json = r#"{"name":"tree","path":"tree.obj","position":{"x":1,"y":0,"z":2}}"#;
        let model: RegisteredModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(model.position.z, 2.0);
        assert_eq!(model.ground_snap_offset, 0.0);

        let json = r#"{"name":"rock","path":"rock.obj","position":{"x":0,"y":0,"z":0},"ground_snap_offset":0.4}"#;
        let model: RegisteredModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.ground_snap_offset, 0.4);
    }
}
