//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. The driver owns
//! it exclusively and hands it to each component in turn.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::{Bounded, Rect};
use super::wave;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// An enemy reached the player's row
    Invasion,
    /// The player ran out of lives
    Attrition,
}

/// Notable things that happened during a tick (cleared every tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { kind: EnemyKind, points: u64 },
    EnemySplit { at: Vec2 },
    PowerUp { level: u8 },
    BonusSpawned,
    BonusDestroyed,
    BarrierDestroyed,
    PlayerHit { lives: u8 },
    WaveCleared { stage: u32, bonus: u64 },
    GameOver { cause: LossCause },
    Restarted,
}

/// Visual identity of an enemy kind (renderers map this to a color or glyph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Cyan,
    Magenta,
    Yellow,
}

/// Per-kind constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStats {
    pub base_health: u32,
    pub points: u64,
    pub tint: Tint,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Armored,
    Boss,
    Splitter,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Normal,
        EnemyKind::Armored,
        EnemyKind::Boss,
        EnemyKind::Splitter,
    ];

    pub const fn stats(self) -> KindStats {
        match self {
            EnemyKind::Normal => KindStats {
                base_health: 1,
                points: 100,
                tint: Tint::Red,
            },
            EnemyKind::Armored => KindStats {
                base_health: 3,
                points: 300,
                tint: Tint::Cyan,
            },
            EnemyKind::Boss => KindStats {
                base_health: 10,
                points: 1000,
                tint: Tint::Magenta,
            },
            EnemyKind::Splitter => KindStats {
                base_health: 2,
                points: 200,
                tint: Tint::Yellow,
            },
        }
    }

    #[inline]
    pub const fn base_health(self) -> u32 {
        self.stats().base_health
    }

    #[inline]
    pub const fn points(self) -> u64 {
        self.stats().points
    }

    #[inline]
    pub const fn tint(self) -> Tint {
        self.stats().tint
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
    /// Current horizontal velocity command
    pub dx: f32,
    pub lives: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                PLAYFIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                PLAYFIELD_HEIGHT - PLAYER_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            dx: 0.0,
            lives: MAX_LIVES,
        }
    }
}

impl Player {
    /// Set the velocity command from a direction (-1, 0, +1)
    pub fn steer(&mut self, direction: i8) {
        self.dx = f32::from(direction.signum()) * self.speed;
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed (pixels per tick)
    pub speed: f32,
    /// Horizontal drift per tick (angled shots)
    pub drift: f32,
    pub damage: u32,
}

impl Bullet {
    /// Fire from the player's nose at the given angle (0 = straight up)
    pub fn fired_by(player: &Player, power_level: u8, angle: f32) -> Self {
        let width = Self::width_for_power(power_level);
        let speed = BULLET_BASE_SPEED + f32::from(power_level.min(10));
        Self {
            pos: Vec2::new(player.pos.x + player.size.x / 2.0 - width / 2.0, player.pos.y),
            size: Vec2::new(width, BULLET_HEIGHT),
            speed,
            drift: angle.sin() * speed * BULLET_DRIFT_FACTOR,
            damage: Self::damage_for_power(power_level),
        }
    }

    pub fn width_for_power(power_level: u8) -> f32 {
        (BULLET_BASE_WIDTH + f32::from(power_level) * 2.0).min(BULLET_MAX_WIDTH)
    }

    pub fn damage_for_power(power_level: u8) -> u32 {
        1 + u32::from(power_level / 5)
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// An enemy bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed (pixels per tick)
    pub speed: f32,
}

impl EnemyBullet {
    /// Spawn below a shooter whose top-left corner is `origin`
    pub fn fired_from(origin: Vec2, stage: u32) -> Self {
        Self {
            pos: Vec2::new(origin.x + ENEMY_WIDTH / 2.0, origin.y + ENEMY_HEIGHT),
            size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            speed: ENEMY_BULLET_BASE_SPEED + (stage / 2) as f32,
        }
    }
}

impl Bounded for EnemyBullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// An enemy in the wave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub kind: EnemyKind,
    pub alive: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, size: Vec2, health: u32) -> Self {
        Self {
            pos,
            size,
            health,
            max_health: health,
            kind,
            alive: health > 0,
        }
    }

    /// Apply damage. Returns true only on the hit that kills the enemy.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A destructible barrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
}

impl Barrier {
    pub fn hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

impl Bounded for Barrier {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The periodic bonus target (UFO)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusTarget {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
    pub active: bool,
    pub health: u32,
    /// When the current cooldown started (ms)
    pub last_spawn_at: f64,
}

impl BonusTarget {
    /// Inactive target whose cooldown starts at `now_ms`
    pub fn parked(now_ms: f64) -> Self {
        Self {
            pos: Vec2::new(-UFO_OFFSCREEN, UFO_Y),
            size: Vec2::new(UFO_WIDTH, UFO_HEIGHT),
            speed: UFO_SPEED,
            active: false,
            health: UFO_HEALTH,
            last_spawn_at: now_ms,
        }
    }

    /// Enter from the left edge with full health
    pub fn activate(&mut self, now_ms: f64) {
        self.active = true;
        self.pos.x = -UFO_OFFSCREEN;
        self.health = UFO_HEALTH;
        self.last_spawn_at = now_ms;
    }
}

impl Bounded for BonusTarget {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The enemy wave and its cadence timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// Enemies in grid order (split offspring are appended)
    pub enemies: Vec<Enemy>,
    /// Sweep direction: +1 right, -1 left
    pub direction: f32,
    /// Horizontal step per move (pixels)
    pub speed: f32,
    pub move_interval_ms: f64,
    pub shoot_interval_ms: f64,
    pub last_move_at: f64,
    pub last_shot_at: f64,
}

impl Formation {
    /// Fresh wave for `stage`, timers starting at `now_ms`
    pub fn for_stage(stage: u32, now_ms: f64) -> Self {
        Self {
            enemies: wave::generate_wave(stage),
            direction: 1.0,
            speed: FORMATION_SPEED,
            move_interval_ms: wave::move_interval_ms(stage),
            shoot_interval_ms: wave::shoot_interval_ms(stage),
            last_move_at: now_ms,
            last_shot_at: now_ms,
        }
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.alive().next().is_none()
    }
}

/// Score, stage and power counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub stage: u32,
    pub killed_count: u32,
    pub power_level: u8,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            score: 0,
            stage: 1,
            killed_count: 0,
            power_level: 0,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Enemy fire selection RNG
    pub rng: Pcg32,
    /// Timestamp of the most recent tick (ms)
    pub now_ms: f64,
    /// Ticks simulated so far
    pub ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub formation: Formation,
    pub barriers: Vec<Barrier>,
    pub bonus: BonusTarget,
    pub progression: Progression,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at stage 1 with all timers starting at `now_ms`
    pub fn new(seed: u64, now_ms: f64) -> Self {
        let progression = Progression::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms,
            ticks: 0,
            phase: GamePhase::Playing,
            player: Player::default(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            formation: Formation::for_stage(progression.stage, now_ms),
            barriers: wave::generate_barriers(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            bonus: BonusTarget::parked(now_ms),
            progression,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn stage(&self) -> u32 {
        self.progression.stage
    }

    pub fn score(&self) -> u64 {
        self.progression.score
    }

    pub fn power_level(&self) -> u8 {
        self.progression.power_level
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
