use std::collections::HashSet;

use crate::input::queue::InputEvent;

/// DOM `keyCode` values for the keys the engine names.
pub mod key {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
}

/// Held state of the four arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Keys currently held down, folded from key events.
/// A key stays held across frames until its `KeyUp` (or a `Blur`).
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<u32>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.held.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
            InputEvent::Blur => self.held.clear(),
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn is_down(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    pub fn cursor_keys(&self) -> CursorKeys {
        CursorKeys {
            up: self.is_down(key::UP),
            down: self.is_down(key::DOWN),
            left: self.is_down(key::LEFT),
            right: self.is_down(key::RIGHT),
        }
    }
}
