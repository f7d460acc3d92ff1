//! In-memory store

use std::collections::HashMap;

use crate::collider::CollisionSetup;
use super::{check_name, decode, encode, CollisionStore, StoreError};

/// Store keeping serialized setups in a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw JSON under a name without checking it
    pub fn insert_raw(&mut self, name: impl Into<String>, json: impl Into<String>) {
        self.entries.insert(name.into(), json.into());
    }

    /// Number of stored setups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CollisionStore for MemoryStore {
    fn save(&mut self, name: &str, setup: &CollisionSetup) -> Result<(), StoreError> {
        let json = encode(name, setup)?;
        self.entries.insert(name.to_string(), json);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<CollisionSetup, StoreError> {
        check_name(name)?;
        let json = self
            .entries
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        decode(name, json)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        check_name(name)?;
        self.entries.remove(name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{ColliderPrimitive, ShapeKind};
    use crate::foundation::math::Vec3;

    fn setup() -> CollisionSetup {
        let wall = ColliderPrimitive::from_dimensions(
            ShapeKind::Box,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::zeros(),
            Vec3::new(2.0, 2.0, 0.5),
            1,
        );
        CollisionSetup::new("house.obj", vec![wall])
    }

    #[test]
    fn test_save_overwrites_and_lists_sorted() {
        let mut store = MemoryStore::new();
        store.save("zeta", &setup()).unwrap();
        store.save("alpha", &CollisionSetup::empty("a.obj")).unwrap();
        store.save("alpha", &setup()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(store.load("alpha").unwrap(), setup());
    }

    #[test]
    fn test_missing_and_corrupt_entries() {
        let mut store = MemoryStore::new();
        assert!(store.load("nothing").unwrap_err().is_not_found());
        assert!(store.load_or_empty("nothing", "n.obj").unwrap().is_empty());
        store.delete("nothing").unwrap();

        store.insert_raw("broken", "{\"modelPath\": 3}");
        assert!(matches!(store.load("broken"), Err(StoreError::Malformed { .. })));
        assert!(matches!(store.load_or_empty("broken", "b.obj"), Err(StoreError::Malformed { .. })));
    }
}
