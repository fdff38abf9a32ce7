//! Keyboard input latch
//!
//! Key events flip held flags; the simulation reads a snapshot each tick.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputLatch {
    left: bool,
    right: bool,
}

impl InputLatch {
    pub fn set_left_held(&mut self, held: bool) {
        self.left = held;
    }

    pub fn set_right_held(&mut self, held: bool) {
        self.right = held;
    }

    /// Apply a DOM `KeyboardEvent.key` value. Returns false for keys the game
    /// doesn't use.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match key {
            "ArrowLeft" => self.set_left_held(pressed),
            "ArrowRight" => self.set_right_held(pressed),
            _ => return false,
        }
        true
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}
