//! Editor commands and key shortcuts

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::collider::ShapeKind;
use crate::foundation::collections::ColliderId;
use crate::foundation::math::Vec3;
use crate::input::KeyCode;
use super::camera::FlyCamera;
use super::AuthoringError;

/// What a drag does to the selected collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolMode {
    /// Dragging does nothing
    #[default]
    Select,
    /// Dragging translates
    Move,
    /// Dragging scales
    Resize,
    /// Dragging rotates
    Rotate,
}

impl ToolMode {
    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::Move => "move",
            ToolMode::Resize => "resize",
            ToolMode::Rotate => "rotate",
        }
    }

    /// Parse a lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        [ToolMode::Select, ToolMode::Move, ToolMode::Resize, ToolMode::Rotate]
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the authoring session can be asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Create a collider at the origin and select it
    Place(ShapeKind),
    /// Select a collider
    Select(ColliderId),
    /// Drop the selection
    Deselect,
    /// Change the active tool
    SetTool(ToolMode),
    /// Apply the active tool to the selection
    Drag(Vec3),
    /// Remove the selected collider
    DeleteSelected,
    /// Remove every collider
    ClearAll,
    /// Write the colliders to the store under the session name
    Save,
    /// Replace the colliders with the stored setup
    Load,
    /// Write the colliders to a JSON file
    Export(PathBuf),
    /// Replace the colliders with a JSON file's contents
    Import(PathBuf),
    /// Remove the stored setup and every collider
    Wipe,
}

/// Single-key shortcuts
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, EditorCommand>,
}

impl KeyBindings {
    /// No shortcuts
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a key. Camera movement keys cannot be bound.
    pub fn bind(&mut self, key: KeyCode, command: EditorCommand) -> Result<(), AuthoringError> {
        if FlyCamera::owns_key(key) {
            return Err(AuthoringError::ReservedKey(key));
        }
        self.bindings.insert(key, command);
        Ok(())
    }

    /// Remove a binding
    pub fn unbind(&mut self, key: KeyCode) -> Option<EditorCommand> {
        self.bindings.remove(&key)
    }

    /// Command bound to a key
    pub fn command_for(&self, key: KeyCode) -> Option<&EditorCommand> {
        self.bindings.get(&key)
    }

    /// Every bound key
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings.keys().copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(KeyCode::B, EditorCommand::Place(ShapeKind::Box));
        bindings.insert(KeyCode::C, EditorCommand::Place(ShapeKind::Cylinder));
        bindings.insert(KeyCode::F, EditorCommand::Place(ShapeKind::Floor));
        bindings.insert(KeyCode::R, EditorCommand::Place(ShapeKind::Ramp));
        bindings.insert(KeyCode::Digit1, EditorCommand::SetTool(ToolMode::Select));
        bindings.insert(KeyCode::Digit2, EditorCommand::SetTool(ToolMode::Move));
        bindings.insert(KeyCode::Digit3, EditorCommand::SetTool(ToolMode::Resize));
        bindings.insert(KeyCode::Digit4, EditorCommand::SetTool(ToolMode::Rotate));
        bindings.insert(KeyCode::Delete, EditorCommand::DeleteSelected);
        bindings.insert(KeyCode::Backspace, EditorCommand::DeleteSelected);
        bindings.insert(KeyCode::Escape, EditorCommand::Deselect);
        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_avoid_camera_keys() {
        let bindings = KeyBindings::default();
        assert!(bindings.keys().all(|key| !FlyCamera::owns_key(key)));
        assert_eq!(bindings.command_for(KeyCode::C), Some(&EditorCommand::Place(ShapeKind::Cylinder)));
    }

    #[test]
    fn test_camera_keys_cannot_be_bound() {
        let mut bindings = KeyBindings::empty();
        assert!(matches!(
            bindings.bind(KeyCode::S, EditorCommand::Save),
            Err(AuthoringError::ReservedKey(KeyCode::S))
        ));
        bindings.bind(KeyCode::K, EditorCommand::Save).unwrap();
        assert_eq!(bindings.command_for(KeyCode::K), Some(&EditorCommand::Save));
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(ToolMode::from_name("Resize"), Some(ToolMode::Resize));
        assert_eq!(ToolMode::default(), ToolMode::Select);
    }
}
