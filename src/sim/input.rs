//! Polled input state
//!
//! The platform layer writes raw key and pointer events here; the simulation
//! only reads it. Key names are stored lowercased, so "W" and "w" are the same
//! key and unknown names are simply never queried.

use std::collections::HashSet;

use glam::Vec2;

/// Pointer (mouse) state in canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    pub down: bool,
}

/// Keys currently held plus the pointer
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<String>,
    pub pointer: PointerState,
}

const UP_KEYS: [&str; 2] = ["w", "arrowup"];
const DOWN_KEYS: [&str; 2] = ["s", "arrowdown"];
const LEFT_KEYS: [&str; 2] = ["a", "arrowleft"];
const RIGHT_KEYS: [&str; 2] = ["d", "arrowright"];
const FREEZE_KEYS: [&str; 2] = ["shift", " "];
const FIRE_KEY: &str = " ";

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    /// Drop every held key (window blur loses keyup events)
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.pointer.down = false;
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    fn any_down(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.keys.contains(*k))
    }

    /// Raw directional input in screen space (y grows downward), not normalized
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.any_down(&UP_KEYS) {
            axis.y -= 1.0;
        }
        if self.any_down(&DOWN_KEYS) {
            axis.y += 1.0;
        }
        if self.any_down(&LEFT_KEYS) {
            axis.x -= 1.0;
        }
        if self.any_down(&RIGHT_KEYS) {
            axis.x += 1.0;
        }
        axis
    }

    /// Any movement key held, even if opposing keys cancel out
    pub fn thrusting(&self) -> bool {
        self.any_down(&UP_KEYS)
            || self.any_down(&DOWN_KEYS)
            || self.any_down(&LEFT_KEYS)
            || self.any_down(&RIGHT_KEYS)
    }

    pub fn freeze_held(&self) -> bool {
        self.any_down(&FREEZE_KEYS)
    }

    pub fn fire_held(&self) -> bool {
        self.keys.contains(FIRE_KEY) || self.pointer.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut input = InputState::new();
        input.press("W");
        assert!(input.is_down("w"));
        assert_eq!(input.move_axis(), Vec2::new(0.0, -1.0));
        input.release("w");
        assert!(!input.is_down("W"));
    }

    #[test]
    fn test_opposing_keys_cancel_but_still_thrust() {
        let mut input = InputState::new();
        input.press("ArrowLeft");
        input.press("d");
        assert_eq!(input.move_axis(), Vec2::ZERO);
        assert!(input.thrusting());
    }

    #[test]
    fn test_space_freezes_and_fires() {
        let mut input = InputState::new();
        input.press(" ");
        assert!(input.freeze_held());
        assert!(input.fire_held());
    }

    #[test]
    fn test_pointer_fires_and_unknown_keys_ignored() {
        let mut input = InputState::new();
        input.press("F13");
        assert!(!input.fire_held());
        assert!(!input.thrusting());
        input.pointer.down = true;
        assert!(input.fire_held());
        input.release_all();
        assert!(!input.fire_held());
        assert!(!input.is_down("f13"));
    }
}
