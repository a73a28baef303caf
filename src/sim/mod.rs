//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the timestamp handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (wave grid order, splits appended)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod progression;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionReport, resolve};
pub use rect::{Bounded, Rect};
pub use state::{
    Barrier, BonusTarget, Bullet, Enemy, EnemyBullet, EnemyKind, Formation, GameEvent, GamePhase,
    GameState, KindStats, LossCause, Player, Progression, Tint,
};
pub use tick::{TickInput, fire, fire_pattern, tick};
pub use wave::{enemy_health, generate_barriers, generate_wave, grid_dimensions};
