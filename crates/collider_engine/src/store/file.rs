//! Directory-backed store, one JSON file per setup

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::collider::CollisionSetup;
use super::{check_name, decode, encode, CollisionStore, StoreError};

const EXTENSION: &str = "json";

/// Store writing `<directory>/<name>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Store rooted at `directory`. The directory is created on first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Root directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        check_name(name)?;
        Ok(self.directory.join(format!("{name}.{EXTENSION}")))
    }
}

impl CollisionStore for FileStore {
    fn save(&mut self, name: &str, setup: &CollisionSetup) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let json = encode(name, setup)?;
        fs::create_dir_all(&self.directory)?;

        // Write beside the target first so a failed write never truncates it
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;
        log::debug!("Saved {} colliders to {}", setup.colliders.len(), path.display());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<CollisionSetup, StoreError> {
        let path = self.path_for(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(name.to_string())),
            Err(e) => return Err(e.into()),
        };
        decode(name, &json)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::{ColliderPrimitive, ShapeKind};
    use crate::foundation::math::Vec3;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("collider_store_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = scratch_dir("round_trip");
        let mut store = FileStore::new(&dir);
        assert!(store.list().unwrap().is_empty());

        let floor = ColliderPrimitive::from_dimensions(
            ShapeKind::Floor,
            Vec3::new(1.0, 0.1, 1.0),
            Vec3::zeros(),
            Vec3::new(4.0, 0.2, 4.0),
            5,
        );
        let setup = CollisionSetup::new("barn.obj", vec![floor]);
        store.save("barn", &setup).unwrap();
        store.save("attic", &CollisionSetup::empty("attic.obj")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["attic".to_string(), "barn".to_string()]);
        assert_eq!(store.load("barn").unwrap(), setup);

        store.delete("barn").unwrap();
        store.delete("barn").unwrap();
        assert!(store.load("barn").unwrap_err().is_not_found());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_is_malformed() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bad.json"), "not json").unwrap();
        let store = FileStore::new(&dir);
        assert!(matches!(store.load("bad"), Err(StoreError::Malformed { .. })));
        assert!(matches!(store.load("../bad"), Err(StoreError::InvalidName(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
