//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one frame. The step order
//! is fixed: collisions and loss checks must see this frame's positions.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

use super::collision;
use super::motion;
use super::progression;
use super::state::{Bullet, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (drained from the input mailbox)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Horizontal steering: -1 left, 0 stop, +1 right
    pub direction: i8,
    /// Fire a volley
    pub fire: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
}

/// Advance the game state by one frame at timestamp `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.events.clear();
    state.now_ms = now_ms;

    if input.restart {
        progression::restart(state, now_ms);
    }

    // The world is frozen until restart
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.ticks += 1;
    state.player.steer(input.direction);
    if input.fire {
        fire(state);
    }

    motion::update_bonus_target(state, now_ms);
    motion::update_formation(state, now_ms);
    motion::move_player(state);
    motion::move_bullets(state);
    collision::resolve(state);
    progression::check_transitions(state, now_ms);
}

/// Shot angles for a power level (0 = straight up)
pub fn fire_pattern(power_level: u8) -> Vec<f32> {
    match power_level {
        16.. => (0..8).map(|i| i as f32 * FRAC_PI_4).collect(),
        11.. => vec![0.0, FRAC_PI_6, -FRAC_PI_6, FRAC_PI_3, -FRAC_PI_3],
        6.. => vec![0.0, FRAC_PI_6, -FRAC_PI_6],
        _ => vec![0.0],
    }
}

/// Fire the current pattern. Returns the number of bullets spawned.
pub fn fire(state: &mut GameState) -> usize {
    if state.phase != GamePhase::Playing || !state.player.is_alive() {
        return 0;
    }
    if state.bullets.len() >= MAX_PLAYER_BULLETS {
        return 0;
    }

    let power = state.progression.power_level;
    let pattern = fire_pattern(power);
    let player = &state.player;
    state
        .bullets
        .extend(pattern.iter().map(|&angle| Bullet::fired_by(player, power, angle)));
    pattern.len()
}
