//! Collision setup persistence
//!
//! Setups are stored by name behind the [`CollisionStore`] trait. Stores only
//! check structure; field/type validation happens when records are converted
//! to colliders, and any failure there is reported as
//! [`StoreError::Malformed`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::collider::CollisionSetup;

/// Persistence errors
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Nothing is stored under the name
    #[error("no collision setup named '{0}'")]
    NotFound(String),

    /// Stored data could not be read back as a setup
    #[error("collision setup '{name}' is malformed: {reason}")]
    Malformed {
        /// Store key
        name: String,
        /// What was wrong
        reason: String,
    },

    /// The name cannot be used as a key
    #[error("invalid collision setup name '{0}'")]
    InvalidName(String),

    /// Underlying IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Setup could not be serialized
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl StoreError {
    /// Whether the error only means "nothing saved yet"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Keyed storage of collision setups
pub trait CollisionStore {
    /// Store a setup, overwriting any previous one with the same name
    fn save(&mut self, name: &str, setup: &CollisionSetup) -> Result<(), StoreError>;

    /// Read a setup back
    fn load(&self, name: &str) -> Result<CollisionSetup, StoreError>;

    /// Remove a setup. Removing a missing name succeeds.
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    /// Stored names, sorted
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Load a setup, treating a missing one as an empty setup for `model_path`
    fn load_or_empty(&self, name: &str, model_path: &str) -> Result<CollisionSetup, StoreError> {
        match self.load(name) {
            Err(StoreError::NotFound(_)) => {
                log::info!("No collision setup for '{name}', starting with zero colliders");
                Ok(CollisionSetup::empty(model_path))
            }
            other => other,
        }
    }
}

/// Reject names that are empty or could escape a directory
pub(crate) fn check_name(name: &str) -> Result<(), StoreError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || name.trim() != name;
    if bad {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

pub(crate) fn encode(name: &str, setup: &CollisionSetup) -> Result<String, StoreError> {
    check_name(name)?;
    setup.to_json().map_err(|e| StoreError::Serialize(e.to_string()))
}

pub(crate) fn decode(name: &str, json: &str) -> Result<CollisionSetup, StoreError> {
    CollisionSetup::from_json(json).map_err(|e| StoreError::Malformed {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_checks() {
        assert!(check_name("tavern_01").is_ok());
        assert!(check_name("Old Mill").is_ok());
        for bad in ["", "..", "a/b", "a\\b", " padded"] {
            assert!(matches!(check_name(bad), Err(StoreError::InvalidName(_))), "{bad:?}");
        }
    }
}
