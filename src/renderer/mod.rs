//! Rendering module
//!
//! Renderers never touch `GameState` directly. They read a [`Snapshot`], a
//! plain copy of everything drawable, so any backend can be swapped in.

pub mod text;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{EnemyKind, GameState, Tint};

/// A drawable enemy
#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub tint: Tint,
    pub health: u32,
    pub max_health: u32,
}

impl EnemyView {
    /// Remaining health as a fraction (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

/// A drawable box with no extra attributes (bullets)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoxView {
    pub pos: Vec2,
    pub size: Vec2,
}

/// The player ship
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u8,
}

/// A barrier with its remaining health
#[derive(Debug, Clone, Serialize)]
pub struct BarrierView {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
}

/// The bonus target
#[derive(Debug, Clone, Serialize)]
pub struct BonusView {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub health: u32,
}

/// Read-only copy of the drawable state for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Alive enemies only
    pub enemies: Vec<EnemyView>,
    pub player: PlayerView,
    pub bullets: Vec<BoxView>,
    pub enemy_bullets: Vec<BoxView>,
    pub barriers: Vec<BarrierView>,
    pub bonus: BonusView,
    pub score: u64,
    pub stage: u32,
    pub power_level: u8,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            enemies: state
                .formation
                .alive()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: e.size,
                    kind: e.kind,
                    tint: e.kind.tint(),
                    health: e.health,
                    max_health: e.max_health,
                })
                .collect(),
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                lives: state.player.lives,
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| BoxView {
                    pos: b.pos,
                    size: b.size,
                })
                .collect(),
            enemy_bullets: state
                .enemy_bullets
                .iter()
                .map(|b| BoxView {
                    pos: b.pos,
                    size: b.size,
                })
                .collect(),
            barriers: state
                .barriers
                .iter()
                .map(|b| BarrierView {
                    pos: b.pos,
                    size: b.size,
                    health: b.health,
                })
                .collect(),
            bonus: BonusView {
                pos: state.bonus.pos,
                size: state.bonus.size,
                active: state.bonus.active,
                health: state.bonus.health,
            },
            score: state.progression.score,
            stage: state.progression.stage,
            power_level: state.progression.power_level,
            game_over: state.is_game_over(),
        }
    }

    /// One-line HUD, e.g. `SCORE 000100  STAGE 1  LIVES 3  POWER 0/20`
    pub fn hud_line(&self) -> String {
        let mut line = format!(
            "SCORE {:06}  STAGE {}  LIVES {}  POWER {}/{}",
            self.score,
            self.stage,
            self.player.lives,
            self.power_level,
            crate::consts::MAX_POWER_LEVEL
        );
        if self.game_over {
            line.push_str("  GAME OVER - PRESS R TO RESTART");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_skips_dead_enemies() {
        let mut state = GameState::new(1, 0.0);
        state.formation.enemies[0].alive = false;
        state.formation.enemies[0].health = 0;
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.enemies.len(), state.formation.enemies.len() - 1);
        assert_eq!(snapshot.barriers.len(), 4);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_health_fraction() {
        let state = GameState::new(1, 0.0);
        let mut view = Snapshot::capture(&state).enemies[0].clone();
        view.health = 1;
        view.max_health = 4;
        assert_eq!(view.health_fraction(), 0.25);
    }

    #[test]
    fn test_hud_line() {
        let mut state = GameState::new(1, 0.0);
        state.progression.score = 4200;
        let hud = Snapshot::capture(&state).hud_line();
        assert_eq!(hud, "SCORE 004200  STAGE 1  LIVES 3  POWER 0/20");
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1, 0.0);
        let json = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        assert_eq!(json["stage"], 1);
        assert_eq!(json["game_over"], false);
    }
}
