//! Input handling
//!
//! Key codes, held-key tracking and mouse state for the authoring session.

pub mod picking;

pub use picking::MouseState;

use std::collections::HashSet;

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Returns true on a fresh press.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key);
            false
        }
    }

    /// Whether the key is held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Release every key
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// 1 key
    Digit1,
    /// 2 key
    Digit2,
    /// 3 key
    Digit3,
    /// 4 key
    Digit4,
    /// Delete key
    Delete,
    /// Backspace key
    Backspace,
}

impl KeyCode {
    /// Parse a key name such as `w`, `4` or `delete`
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" => KeyCode::Space,
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "1" => KeyCode::Digit1,
            "2" => KeyCode::Digit2,
            "3" => KeyCode::Digit3,
            "4" => KeyCode::Digit4,
            "delete" | "del" => KeyCode::Delete,
            "backspace" => KeyCode::Backspace,
            _ => {
                let mut chars = lower.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                Self::from_letter(c)?
            }
        };
        Some(key)
    }

    fn from_letter(c: char) -> Option<Self> {
        const LETTERS: [KeyCode; 26] = [
            KeyCode::A, KeyCode::B, KeyCode::C, KeyCode::D, KeyCode::E, KeyCode::F, KeyCode::G,
            KeyCode::H, KeyCode::I, KeyCode::J, KeyCode::K, KeyCode::L, KeyCode::M, KeyCode::N,
            KeyCode::O, KeyCode::P, KeyCode::Q, KeyCode::R, KeyCode::S, KeyCode::T, KeyCode::U,
            KeyCode::V, KeyCode::W, KeyCode::X, KeyCode::Y, KeyCode::Z,
        ];
        c.is_ascii_lowercase().then(|| LETTERS[(c as u8 - b'a') as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_name("w"), Some(KeyCode::W));
        assert_eq!(KeyCode::from_name("Z"), Some(KeyCode::Z));
        assert_eq!(KeyCode::from_name("3"), Some(KeyCode::Digit3));
        assert_eq!(KeyCode::from_name("Delete"), Some(KeyCode::Delete));
        assert_eq!(KeyCode::from_name("ww"), None);
        assert_eq!(KeyCode::from_name("9"), None);
    }

    #[test]
    fn test_fresh_press_reported_once() {
        let mut input = InputState::new();
        assert!(input.handle_key_input(KeyCode::W, true));
        assert!(!input.handle_key_input(KeyCode::W, true));
        assert!(input.is_held(KeyCode::W));
        input.handle_key_input(KeyCode::W, false);
        assert!(!input.is_held(KeyCode::W));
    }
}
