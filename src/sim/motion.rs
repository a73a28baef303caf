//! Per-tick motion
//!
//! Continuous motion (player, bullets, bonus target) runs every tick. The
//! enemy formation only moves and fires when its cadence timers allow.

use rand::Rng;

use super::state::{EnemyBullet, GameEvent, GameState};
use super::wave::shooters_per_volley;
use crate::consts::*;

/// Apply the player's velocity command, clamped to the playfield
pub fn move_player(state: &mut GameState) {
    let player = &mut state.player;
    player.pos.x = (player.pos.x + player.dx).clamp(0.0, PLAYFIELD_WIDTH - player.size.x);
}

/// Advance both bullet collections and drop the ones that left the playfield
pub fn move_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
        bullet.pos.x += bullet.drift;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);

    for bullet in &mut state.enemy_bullets {
        bullet.pos.y += bullet.speed;
    }
    state.enemy_bullets.retain(|b| b.pos.y <= PLAYFIELD_HEIGHT);
}

/// Fly the bonus target across the top, or count down to its next pass
pub fn update_bonus_target(state: &mut GameState, now_ms: f64) {
    let bonus = &mut state.bonus;
    if bonus.active {
        bonus.pos.x += bonus.speed;
        if bonus.pos.x > PLAYFIELD_WIDTH + UFO_OFFSCREEN {
            bonus.active = false;
            log::debug!("Bonus target escaped");
        }
        return;
    }

    if now_ms - bonus.last_spawn_at >= UFO_SPAWN_INTERVAL_MS {
        bonus.activate(now_ms);
        log::debug!("Bonus target spawned at {:.0}ms", now_ms);
        state.emit(GameEvent::BonusSpawned);
    }
}

/// Cadence-gated formation sweep plus enemy volleys
pub fn update_formation(state: &mut GameState, now_ms: f64) {
    step_formation(state, now_ms);
    fire_volley(state, now_ms);
}

/// One lock-step move: sweep sideways, or drop a row and reverse at an edge
fn step_formation(state: &mut GameState, now_ms: f64) {
    let formation = &mut state.formation;
    if now_ms - formation.last_move_at < formation.move_interval_ms {
        return;
    }
    formation.last_move_at = now_ms;

    let Some((min_x, max_x)) = formation.alive().fold(None, |extent, e| {
        let (lo, hi) = extent.unwrap_or((f32::MAX, f32::MIN));
        Some((lo.min(e.pos.x), hi.max(e.pos.x + e.size.x)))
    }) else {
        return;
    };

    let step = formation.speed;
    let edge_reached = if formation.direction > 0.0 {
        max_x + step > PLAYFIELD_WIDTH - FORMATION_MARGIN
    } else {
        min_x - step < FORMATION_MARGIN
    };

    if edge_reached {
        for enemy in formation.enemies.iter_mut().filter(|e| e.alive) {
            enemy.pos.y += ENEMY_HEIGHT / 2.0;
        }
        formation.direction = -formation.direction;
        log::trace!("Formation dropped, direction now {}", formation.direction);
    } else {
        let dx = step * formation.direction;
        for enemy in formation.enemies.iter_mut().filter(|e| e.alive) {
            enemy.pos.x += dx;
        }
    }
}

/// Pick random alive shooters (with replacement) and spawn their bullets
fn fire_volley(state: &mut GameState, now_ms: f64) {
    if now_ms - state.formation.last_shot_at < state.formation.shoot_interval_ms {
        return;
    }
    state.formation.last_shot_at = now_ms;

    let stage = state.progression.stage;
    let shooters: Vec<_> = state.formation.alive().map(|e| e.pos).collect();
    if shooters.is_empty() {
        return;
    }

    let volley = shooters_per_volley(stage);
    for _ in 0..volley {
        let origin = shooters[state.rng.random_range(0..shooters.len())];
        state.enemy_bullets.push(EnemyBullet::fired_from(origin, stage));
    }
    log::debug!("Enemy volley: {} shots from {} candidates", volley, shooters.len());
}
