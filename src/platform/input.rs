//! Keyboard and pointer state
//!
//! Written by event handlers whenever they fire, read once per frame.
//! Held keys are level-triggered (last write wins); pointer moves and the
//! pause/start requests are one-shots consumed by the next snapshot.

use glam::Vec2;

use crate::sim::TickInput;

/// A key that means something to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Start,
}

impl GameKey {
    /// Map a DOM `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(GameKey::Up),
            "s" | "arrowdown" => Some(GameKey::Down),
            "a" | "arrowleft" => Some(GameKey::Left),
            "d" | "arrowright" => Some(GameKey::Right),
            "escape" | "p" => Some(GameKey::Pause),
            "enter" | " " => Some(GameKey::Start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    pointer: Option<Vec2>,
    pause: bool,
    start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mapped key so callers can suppress browser defaults
    pub fn key_down(&mut self, key: &str) -> Option<GameKey> {
        let mapped = GameKey::from_key(key)?;
        match mapped {
            GameKey::Up => self.up = true,
            GameKey::Down => self.down = true,
            GameKey::Left => self.left = true,
            GameKey::Right => self.right = true,
            GameKey::Pause => self.pause = true,
            GameKey::Start => self.start = true,
        }
        Some(mapped)
    }

    pub fn key_up(&mut self, key: &str) -> Option<GameKey> {
        let mapped = GameKey::from_key(key)?;
        match mapped {
            GameKey::Up => self.up = false,
            GameKey::Down => self.down = false,
            GameKey::Left => self.left = false,
            GameKey::Right => self.right = false,
            GameKey::Pause | GameKey::Start => {}
        }
        Some(mapped)
    }

    /// Release every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }

    /// Absolute pointer position in viewport pixels
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Touch drag: the craft sits `offset_y` above the finger
    pub fn touch_moved(&mut self, pos: Vec2, offset_y: f32) {
        self.pointer = Some(pos - Vec2::new(0.0, offset_y));
    }

    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    pub fn request_start(&mut self) {
        self.start = true;
    }

    /// Consume a pending start request
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start)
    }

    /// Input for this frame; clears the one-shots
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            pointer: self.pointer.take(),
            pause: std::mem::take(&mut self.pause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_wasd_and_arrows_case_insensitively() {
        assert_eq!(GameKey::from_key("W"), Some(GameKey::Up));
        assert_eq!(GameKey::from_key("ArrowLeft"), Some(GameKey::Left));
        assert_eq!(GameKey::from_key("Escape"), Some(GameKey::Pause));
        assert_eq!(GameKey::from_key("q"), None);
    }

    #[test]
    fn last_write_wins_between_frames() {
        let mut input = InputState::new();
        input.key_down("d");
        input.key_up("D");
        input.key_down("d");
        let frame = input.snapshot();
        assert!(frame.right);
        assert!(!frame.left);

        input.key_up("d");
        assert!(!input.snapshot().right);
    }

    #[test]
    fn one_shots_are_consumed() {
        let mut input = InputState::new();
        input.key_down("Escape");
        input.touch_moved(Vec2::new(100.0, 300.0), 50.0);

        let frame = input.snapshot();
        assert!(frame.pause);
        assert_eq!(frame.pointer, Some(Vec2::new(100.0, 250.0)));

        let next = input.snapshot();
        assert!(!next.pause);
        assert_eq!(next.pointer, None);
    }

    #[test]
    fn start_request_is_taken_once() {
        let mut input = InputState::new();
        input.key_down("Enter");
        assert!(input.take_start());
        assert!(!input.take_start());
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.key_down("a");
        input.key_down("ArrowUp");
        input.release_all();
        let frame = input.snapshot();
        assert_eq!(frame.direction(), Vec2::ZERO);
    }
}
