//! Star Invaders - A stage-based invaders arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion, collisions, progression)
//! - `renderer`: Read-only projection of simulation state
//! - `platform`: Input mailbox and frame clock
//! - `settings`: Runtime settings for the native runner

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (ms, ~60 Hz)
    pub const SIM_STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Host frame gaps longer than this are clamped (tab switches, debugger)
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Playfield dimensions (pixels, origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Distance from the bottom of the playfield to the ship's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    pub const MAX_LIVES: u8 = 3;

    /// Player bullets
    pub const BULLET_BASE_SPEED: f32 = 10.0;
    pub const BULLET_BASE_WIDTH: f32 = 8.0;
    pub const BULLET_MAX_WIDTH: f32 = 40.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    /// Horizontal drift factor for angled shots
    pub const BULLET_DRIFT_FACTOR: f32 = 0.5;
    /// Fire is refused while this many player bullets are in flight
    pub const MAX_PLAYER_BULLETS: usize = 3;

    /// Enemy bullets
    pub const ENEMY_BULLET_WIDTH: f32 = 6.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 15.0;
    pub const ENEMY_BULLET_BASE_SPEED: f32 = 2.0;

    /// Enemy grid cell
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_GAP: f32 = 20.0;
    pub const GRID_ORIGIN_X: f32 = 50.0;
    pub const GRID_ORIGIN_Y: f32 = 50.0;
    /// Horizontal step per formation move (pixels)
    pub const FORMATION_SPEED: f32 = 1.0;
    /// Distance kept from the side walls before the formation drops
    pub const FORMATION_MARGIN: f32 = 20.0;

    /// Splitter offspring
    pub const SPLIT_OFFSET: f32 = 20.0;
    pub const SPLIT_SCALE: f32 = 0.6;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 80.0;
    pub const BARRIER_HEIGHT: f32 = 60.0;
    pub const BARRIER_HEALTH: u32 = 6;
    /// Distance from the bottom of the playfield to the barrier top edge
    pub const BARRIER_BOTTOM_OFFSET: f32 = 150.0;

    /// Bonus target (UFO)
    pub const UFO_WIDTH: f32 = 60.0;
    pub const UFO_HEIGHT: f32 = 30.0;
    pub const UFO_Y: f32 = 20.0;
    pub const UFO_SPEED: f32 = 3.0;
    pub const UFO_HEALTH: u32 = 3;
    /// Off-screen slack on both sides of the playfield
    pub const UFO_OFFSCREEN: f32 = 50.0;
    pub const UFO_SPAWN_INTERVAL_MS: f64 = 15_000.0;
    pub const UFO_BONUS_POINTS: u64 = 2000;

    /// Progression
    pub const MAX_POWER_LEVEL: u8 = 20;
    /// Kills needed for each power level
    pub const KILLS_PER_POWER_UP: u32 = 3;
    /// Power level from which bullets pass through enemies
    pub const PIERCE_POWER_LEVEL: u8 = 6;
    /// Per-stage bonus for clearing a wave
    pub const WAVE_CLEAR_BONUS: u64 = 1000;
}

/// Axis-aligned rectangle overlap helper shared by the simulation
pub use sim::rect::Rect;
