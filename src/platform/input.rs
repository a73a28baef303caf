//! Input commands and the per-tick mailbox
//!
//! Key events arrive whenever the host delivers them; the simulation only
//! sees them when the driver drains the mailbox at the next tick. Each
//! command type has one slot and the last write wins.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Discrete commands accepted from an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Left key pressed (`true`) or released (`false`)
    MoveLeft(bool),
    /// Right key pressed (`true`) or released (`false`)
    MoveRight(bool),
    Fire,
    Restart,
}

impl Command {
    /// Map a key-down event by key name. Unknown keys map to `None`.
    pub fn from_key_down(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft(true)),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight(true)),
            " " | "Space" => Some(Command::Fire),
            "r" | "R" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Map a key-up event by key name. Only movement keys have releases.
    pub fn from_key_up(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft(false)),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight(false)),
            _ => None,
        }
    }
}

/// Single-slot mailbox per command type
#[derive(Debug, Clone, Default)]
pub struct InputMailbox {
    left: bool,
    right: bool,
    /// Most recently pressed of the held directions
    last_direction: i8,
    fire: bool,
    restart: bool,
}

impl InputMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command for the next tick
    pub fn post(&mut self, command: Command) {
        match command {
            Command::MoveLeft(active) => {
                self.left = active;
                if active {
                    self.last_direction = -1;
                }
            }
            Command::MoveRight(active) => {
                self.right = active;
                if active {
                    self.last_direction = 1;
                }
            }
            Command::Fire => self.fire = true,
            Command::Restart => self.restart = true,
        }
    }

    /// Record a key-down by name, ignoring anything unrecognised
    pub fn key_down(&mut self, key: &str) {
        match Command::from_key_down(key) {
            Some(command) => self.post(command),
            None => log::debug!("Ignoring unknown key {:?}", key),
        }
    }

    /// Record a key-up by name, ignoring anything unrecognised
    pub fn key_up(&mut self, key: &str) {
        if let Some(command) = Command::from_key_up(key) {
            self.post(command);
        }
    }

    /// Current steering direction without draining anything
    pub fn direction(&self) -> i8 {
        match (self.left, self.right) {
            (true, true) => self.last_direction,
            (true, false) => -1,
            (false, true) => 1,
            (false, false) => 0,
        }
    }

    /// Drain the one-shot slots into a tick's input. Held keys stay held.
    pub fn take(&mut self) -> TickInput {
        TickInput {
            direction: self.direction(),
            fire: std::mem::take(&mut self.fire),
            restart: std::mem::take(&mut self.restart),
        }
    }
}
