//! # Input State
//!
//! Abstract key state sampled by the control systems. The platform layer
//! (or a script, in the demo) sets keys; systems only ever read.

use std::collections::HashMap;

/// The game's logical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Rotate the ship counter-clockwise.
    TurnLeft,
    /// Rotate the ship clockwise.
    TurnRight,
    /// Apply thrust along the current heading.
    Thrust,
    /// Fire a bullet (edge-triggered by the firing system).
    Fire,
}

/// Snapshot of which keys are currently held.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashMap<Key, bool>,
}

impl InputState {
    /// Creates a state with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key as held or released.
    pub fn set(&mut self, key: Key, down: bool) {
        self.held.insert(key, down);
    }

    /// Whether a key is held. Keys never touched read as released.
    #[must_use]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_key_reads_released() {
        let input = InputState::new();
        assert!(!input.is_down(Key::Fire));
    }

    #[test]
    fn test_set_and_release() {
        let mut input = InputState::new();
        input.set(Key::Thrust, true);
        assert!(input.is_down(Key::Thrust));

        input.set(Key::Thrust, false);
        assert!(!input.is_down(Key::Thrust));
    }
}
