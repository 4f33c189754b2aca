//! Held-key input state
//!
//! Press/release events mutate the set between ticks; the simulation only
//! reads it at the start of a tick.

use std::collections::HashSet;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
}

impl Key {
    /// Map a host key name (`"Left"`, `"Right"`, `"space"`) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" | "arrowleft" => Some(Key::Left),
            "right" | "arrowright" => Some(Key::Right),
            "space" | " " => Some(Key::Space),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// (left, right) as consumed by the paddle integrator
    pub fn horizontal(&self) -> (bool, bool) {
        (self.is_held(Key::Left), self.is_held(Key::Right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut keys = KeyState::new();
        keys.press(Key::Left);
        keys.press(Key::Left);
        assert_eq!(keys.horizontal(), (true, false));

        keys.press(Key::Right);
        assert_eq!(keys.horizontal(), (true, true));

        keys.release(Key::Left);
        keys.release(Key::Space);
        assert_eq!(keys.horizontal(), (false, true));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Left"), Some(Key::Left));
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_name("space"), Some(Key::Space));
        assert_eq!(Key::from_name("Escape"), None);
    }
}
