//! Save, load, export, import and wipe for an authoring session
//!
//! Saved setups carry absolute world dimensions. Loading divides them by the
//! measured base dimensions of each shape to recover the editor scale.

use std::fs;
use std::path::Path;

use crate::collider::CollisionSetup;
use crate::store::{CollisionStore, StoreError};
use super::session::{AuthoringSession, NotificationLevel};
use super::AuthoringError;

impl AuthoringSession {
    /// Write the colliders to the store under the session name
    pub fn save(&mut self, store: &mut dyn CollisionStore) -> Result<(), AuthoringError> {
        let setup = self.to_setup();
        store.save(&self.name, &setup)?;
        self.dirty = false;
        self.notify(
            NotificationLevel::Info,
            format!("Saved {} colliders as '{}'", setup.colliders.len(), self.name),
        );
        Ok(())
    }

    /// Replace the colliders with the stored setup. A missing setup leaves
    /// zero colliders; a malformed one leaves the current colliders alone.
    pub fn load(&mut self, store: &dyn CollisionStore) -> Result<(), AuthoringError> {
        match store.load(&self.name) {
            Ok(setup) => {
                self.replace_with(&setup);
                self.notify(
                    NotificationLevel::Info,
                    format!("Loaded {} colliders for '{}'", setup.colliders.len(), self.name),
                );
            }
            Err(StoreError::NotFound(_)) => {
                self.clear_all();
                self.notify(NotificationLevel::Info, format!("No saved colliders for '{}'", self.name));
            }
            Err(e) => return Err(e.into()),
        }
        self.dirty = false;
        Ok(())
    }

    /// Remove the stored setup and every collider
    pub fn wipe(&mut self, store: &mut dyn CollisionStore) -> Result<(), AuthoringError> {
        store.delete(&self.name)?;
        self.clear_all();
        self.dirty = false;
        self.notify(NotificationLevel::Info, format!("Wiped colliders for '{}'", self.name));
        Ok(())
    }

    /// Write the colliders to a JSON file
    pub fn export_to(&mut self, path: &Path) -> Result<(), AuthoringError> {
        let json = self
            .to_setup()
            .to_json()
            .map_err(|e| AuthoringError::Serialize(e.to_string()))?;
        fs::write(path, json)?;
        self.notify(NotificationLevel::Info, format!("Exported to {}", path.display()));
        Ok(())
    }

    /// Replace the colliders with a JSON file's contents. Nothing changes if
    /// the file cannot be read or parsed.
    pub fn import_from(&mut self, path: &Path) -> Result<(), AuthoringError> {
        let json = fs::read_to_string(path)?;
        let setup = CollisionSetup::from_json(&json).map_err(|e| AuthoringError::Malformed(e.to_string()))?;
        self.replace_with(&setup);
        self.dirty = true;
        self.notify(
            NotificationLevel::Info,
            format!("Imported {} colliders from {}", setup.colliders.len(), path.display()),
        );
        Ok(())
    }
}
