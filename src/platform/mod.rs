//! Platform abstraction layer
//!
//! Handles the boundary between the outside world and the simulation:
//! - Input commands (single-slot mailbox drained once per tick)
//! - Frame timing (fixed-timestep clock producing tick timestamps)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Command, InputMailbox};
