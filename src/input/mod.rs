//! # Input Module
//!
//! Host-independent key codes, modifier state and the "active keys" set, plus the
//! macroquad adapter that feeds them into the game.

pub mod handler;

pub use handler::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keyboard keys understood by the game.
///
/// The simulation core only ever sees these values; the host translates its own
/// key codes into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
}

impl Key {
    /// Short label used by on-screen prompts.
    pub fn label(self) -> String {
        match self {
            Key::Key0 => "0".to_string(),
            Key::Key1 => "1".to_string(),
            Key::Key2 => "2".to_string(),
            Key::Key3 => "3".to_string(),
            Key::Key4 => "4".to_string(),
            Key::Key5 => "5".to_string(),
            Key::Key6 => "6".to_string(),
            Key::Key7 => "7".to_string(),
            Key::Key8 => "8".to_string(),
            Key::Key9 => "9".to_string(),
            other => format!("{:?}", other),
        }
    }
}

/// Modifier keys held while a key event happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only shift held.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
}

/// The set of keys currently held down, with the modifiers seen on press.
///
/// Releasing a key removes every entry for it regardless of modifiers, since
/// modifier state can differ between the press and the release of the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveKeys {
    keys: BTreeSet<(Key, Modifiers)>,
}

impl ActiveKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as held.
    pub fn press(&mut self, key: Key, modifiers: Modifiers) {
        self.keys.insert((key, modifiers));
    }

    /// Marks a key as released.
    pub fn release(&mut self, key: Key) {
        self.keys.retain(|(held, _)| *held != key);
    }

    /// Whether the key is held with any modifiers.
    pub fn is_held(&self, key: Key) -> bool {
        self.keys.iter().any(|(held, _)| *held == key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Empties the set, returning its entries in key order.
    pub fn drain(&mut self) -> Vec<(Key, Modifiers)> {
        std::mem::take(&mut self.keys).into_iter().collect()
    }
}

/// Key bindings for every player action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub slash: Key,
    pub spell_cast: Key,
    pub thrust: Key,
    pub shoot: Key,
    pub fire_primary: Key,
    pub fire_secondary: Key,
    pub combine: Key,
    pub element_prev: Key,
    pub element_next: Key,
    pub pickup: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            slash: Key::Key1,
            spell_cast: Key::Key2,
            thrust: Key::Key3,
            shoot: Key::Key4,
            fire_primary: Key::H,
            fire_secondary: Key::J,
            combine: Key::Space,
            element_prev: Key::Q,
            element_next: Key::E,
            pickup: Key::F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_keys_press_and_release() {
        let mut keys = ActiveKeys::new();
        keys.press(Key::W, Modifiers::NONE);
        keys.press(Key::LeftShift, Modifiers::SHIFT);
        assert!(keys.is_held(Key::W));
        assert_eq!(keys.len(), 2);

        keys.release(Key::W);
        assert!(!keys.is_held(Key::W));
        assert!(keys.is_held(Key::LeftShift));
    }

    #[test]
    fn test_release_ignores_modifiers() {
        let mut keys = ActiveKeys::new();
        keys.press(Key::LeftControl, Modifiers { ctrl: true, ..Modifiers::NONE });
        keys.release(Key::LeftControl);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_drain_is_ordered_and_empties() {
        let mut keys = ActiveKeys::new();
        keys.press(Key::LeftShift, Modifiers::SHIFT);
        keys.press(Key::W, Modifiers::NONE);
        let drained = keys.drain();
        assert_eq!(
            drained,
            vec![(Key::W, Modifiers::NONE), (Key::LeftShift, Modifiers::SHIFT)]
        );
        assert!(keys.is_empty());
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(Key::F.label(), "F");
        assert_eq!(Key::Key1.label(), "1");
        assert_eq!(Key::Space.label(), "Space");
    }

    #[test]
    fn test_bindings_round_trip_through_json() {
        let bindings = KeyBindings::default();
        let json = serde_json::to_string(&bindings).unwrap();
        let parsed: KeyBindings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bindings);
    }
}
