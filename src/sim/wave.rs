//! Wave generation
//!
//! Builds the enemy grid and barrier row for a stage, and derives the
//! per-stage cadence values. Everything here is a pure function of the stage.

use glam::Vec2;

use super::state::{Barrier, Enemy, EnemyKind};
use crate::consts::*;

const BASE_COLS: u32 = 15;
const MAX_COLS: u32 = 20;
const BASE_ROWS: u32 = 8;
const MAX_ROWS: u32 = 12;

/// Grid size for a stage as `(cols, rows)`
pub fn grid_dimensions(stage: u32) -> (u32, u32) {
    let stage = stage.max(1);
    let cols = (BASE_COLS + (stage - 1) / 2).min(MAX_COLS);
    let rows = (BASE_ROWS + (stage - 1) / 3).min(MAX_ROWS);
    (cols, rows)
}

/// Spawn health for an enemy kind at a stage
pub fn enemy_health(kind: EnemyKind, stage: u32) -> u32 {
    kind.base_health() + stage.max(1).saturating_sub(1) / 2
}

/// Kind assigned to a grid cell
pub fn kind_for_cell(row: u32, col: u32, rows: u32, cols: u32) -> EnemyKind {
    if row == 0 {
        EnemyKind::Armored
    } else if row + 1 == rows {
        EnemyKind::Splitter
    } else if row == rows / 2 && col == cols / 2 {
        EnemyKind::Boss
    } else {
        EnemyKind::Normal
    }
}

/// Generate the enemy grid for a stage (row-major order)
pub fn generate_wave(stage: u32) -> Vec<Enemy> {
    let (cols, rows) = grid_dimensions(stage);
    let pitch_x = ENEMY_WIDTH + ENEMY_GAP;
    let pitch_y = ENEMY_HEIGHT + ENEMY_GAP;
    let size = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);

    let mut enemies = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let kind = kind_for_cell(row, col, rows, cols);
            let pos = Vec2::new(
                GRID_ORIGIN_X + col as f32 * pitch_x,
                GRID_ORIGIN_Y + row as f32 * pitch_y,
            );
            enemies.push(Enemy::new(kind, pos, size, enemy_health(kind, stage)));
        }
    }

    log::debug!("Stage {} wave: {}x{} ({} enemies)", stage, cols, rows, enemies.len());
    enemies
}

/// Milliseconds between formation moves
pub fn move_interval_ms(stage: u32) -> f64 {
    let steps = f64::from(stage.max(1) - 1);
    (1000.0 - steps * 100.0).max(400.0)
}

/// Milliseconds between enemy volleys
pub fn shoot_interval_ms(stage: u32) -> f64 {
    let steps = f64::from(stage.max(1) - 1);
    (800.0 - steps * 30.0).max(300.0)
}

/// Shooters picked per volley
pub fn shooters_per_volley(stage: u32) -> usize {
    (1 + stage / 3).min(4) as usize
}

/// Evenly spaced barrier row at full health
pub fn generate_barriers(width: f32, height: f32) -> Vec<Barrier> {
    let spacing = width / (BARRIER_COUNT + 1) as f32;
    (0..BARRIER_COUNT)
        .map(|i| Barrier {
            pos: Vec2::new(
                spacing * (i + 1) as f32 - BARRIER_WIDTH / 2.0,
                height - BARRIER_BOTTOM_OFFSET,
            ),
            size: Vec2::new(BARRIER_WIDTH, BARRIER_HEIGHT),
            health: BARRIER_HEALTH,
        })
        .collect()
}

/// The two offspring of a splitter that died with its top-left at `origin`
pub fn spawn_split_pair(origin: Vec2, stage: u32) -> [Enemy; 2] {
    let health = enemy_health(EnemyKind::Normal, stage);
    let size = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT) * SPLIT_SCALE;
    [-SPLIT_OFFSET, SPLIT_OFFSET].map(|offset| {
        Enemy::new(
            EnemyKind::Normal,
            Vec2::new(origin.x + offset, origin.y),
            size,
            health,
        )
    })
}
