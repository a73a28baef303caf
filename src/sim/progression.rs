//! Score, power and stage progression plus the playing / game-over machine

use super::state::{
    BonusTarget, EnemyKind, Formation, GameEvent, GamePhase, GameState, LossCause, Player,
    Progression,
};
use super::wave::generate_barriers;
use crate::consts::*;

/// Book an enemy kill: points, kill count and the power-up every 3rd kill
pub fn register_kill(state: &mut GameState, kind: EnemyKind) {
    let progression = &mut state.progression;
    let points = kind.points() * u64::from(progression.stage);
    progression.score += points;
    progression.killed_count += 1;
    state.emit(GameEvent::EnemyKilled { kind, points });

    let progression = &mut state.progression;
    if progression.killed_count % KILLS_PER_POWER_UP == 0
        && progression.power_level < MAX_POWER_LEVEL
    {
        progression.power_level += 1;
        let level = progression.power_level;
        log::debug!("Power level up: {}", level);
        state.emit(GameEvent::PowerUp { level });
    }
}

/// Switch to game over (idempotent)
pub fn end_run(state: &mut GameState, cause: LossCause) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over ({:?}) at stage {} with {} points",
        cause,
        state.progression.stage,
        state.progression.score
    );
    state.emit(GameEvent::GameOver { cause });
}

/// Loss checks first, then wave clear
pub fn check_transitions(state: &mut GameState, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let player_top = state.player.pos.y;
    if state
        .formation
        .alive()
        .any(|e| e.pos.y + e.size.y >= player_top)
    {
        end_run(state, LossCause::Invasion);
        return;
    }

    if !state.player.is_alive() {
        end_run(state, LossCause::Attrition);
        return;
    }

    if state.formation.is_cleared() {
        advance_stage(state, now_ms);
    }
}

/// Award the clear bonus and build the next stage
fn advance_stage(state: &mut GameState, now_ms: f64) {
    let cleared = state.progression.stage;
    let bonus = u64::from(cleared) * WAVE_CLEAR_BONUS;
    state.progression.score += bonus;
    state.progression.stage += 1;

    let stage = state.progression.stage;
    state.formation = Formation::for_stage(stage, now_ms);
    state.barriers = generate_barriers(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);

    log::info!(
        "Stage {} cleared (+{}), entering stage {} with {} enemies",
        cleared,
        bonus,
        stage,
        state.formation.enemies.len()
    );
    state.emit(GameEvent::WaveCleared {
        stage: cleared,
        bonus,
    });
}

/// Reset to a fresh stage-1 run. Ignored unless the game is over.
pub fn restart(state: &mut GameState, now_ms: f64) {
    if state.phase != GamePhase::GameOver {
        log::debug!("Restart ignored while playing");
        return;
    }

    state.progression = Progression::default();
    state.player = Player::default();
    state.bullets.clear();
    state.enemy_bullets.clear();
    state.formation = Formation::for_stage(state.progression.stage, now_ms);
    state.barriers = generate_barriers(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
    state.bonus = BonusTarget::parked(now_ms);
    state.phase = GamePhase::Playing;

    log::info!("Game restarted");
    state.emit(GameEvent::Restarted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, EnemyBullet};
    use crate::sim::wave::grid_dimensions;
    use glam::Vec2;

    fn kill_all(state: &mut GameState) {
        for enemy in &mut state.formation.enemies {
            enemy.health = 0;
            enemy.alive = false;
        }
    }

    #[test]
    fn test_register_kill_scores_by_stage() {
        let mut state = GameState::new(1, 0.0);
        state.progression.stage = 3;
        register_kill(&mut state, EnemyKind::Armored);
        assert_eq!(state.score(), 900);
        assert_eq!(state.progression.killed_count, 1);
    }

    #[test]
    fn test_power_up_every_third_kill() {
        let mut state = GameState::new(1, 0.0);
        for _ in 0..2 {
            register_kill(&mut state, EnemyKind::Normal);
        }
        assert_eq!(state.power_level(), 0);
        register_kill(&mut state, EnemyKind::Normal);
        assert_eq!(state.power_level(), 1);
        assert!(state.events.contains(&GameEvent::PowerUp { level: 1 }));
    }

    #[test]
    fn test_power_level_caps() {
        let mut state = GameState::new(1, 0.0);
        let mut last = 0;
        for _ in 0..200 {
            register_kill(&mut state, EnemyKind::Normal);
            assert!(state.power_level() >= last);
            last = state.power_level();
        }
        assert_eq!(state.power_level(), MAX_POWER_LEVEL);
    }

    #[test]
    fn test_wave_clear_advances_stage() {
        let mut state = GameState::new(1, 0.0);
        state.progression.score = 50;
        state.barriers.truncate(1);
        state.barriers[0].health = 2;
        kill_all(&mut state);

        check_transitions(&mut state, 4000.0);

        assert_eq!(state.stage(), 2);
        assert_eq!(state.score(), 1050);
        let (cols, rows) = grid_dimensions(2);
        assert_eq!(state.formation.enemies.len(), (cols * rows) as usize);
        assert_eq!(state.formation.move_interval_ms, 900.0);
        assert_eq!(state.formation.last_move_at, 4000.0);
        assert_eq!(state.barriers.len(), 4);
        assert!(state.barriers.iter().all(|b| b.health == 6));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_invasion_ends_run() {
        let mut state = GameState::new(1, 0.0);
        let player_top = state.player.pos.y;
        state.formation.enemies[0].pos.y = player_top - 40.0;
        check_transitions(&mut state, 0.0);
        assert!(state.is_game_over());
        assert!(state.events.contains(&GameEvent::GameOver {
            cause: LossCause::Invasion
        }));
    }

    #[test]
    fn test_dead_enemy_below_line_is_ignored() {
        let mut state = GameState::new(1, 0.0);
        let player_top = state.player.pos.y;
        state.formation.enemies[0].pos.y = player_top;
        state.formation.enemies[0].alive = false;
        state.formation.enemies[0].health = 0;
        check_transitions(&mut state, 0.0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_attrition_ends_run() {
        let mut state = GameState::new(1, 0.0);
        state.player.lives = 0;
        check_transitions(&mut state, 0.0);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(1, 0.0);
        state.progression.score = 1234;
        restart(&mut state, 10.0);
        assert_eq!(state.score(), 1234);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(1, 0.0);
        state.progression = Progression {
            score: 99_000,
            stage: 7,
            killed_count: 40,
            power_level: 13,
        };
        state.player.lives = 0;
        state.player.pos.x = 3.0;
        state.bullets.push(Bullet::fired_by(&state.player, 0, 0.0));
        state.enemy_bullets.push(EnemyBullet::fired_from(Vec2::ZERO, 7));
        state.formation.enemies.truncate(2);
        state.barriers.clear();
        end_run(&mut state, LossCause::Attrition);

        restart(&mut state, 5000.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression, Progression::default());
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.pos, Player::default().pos);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.formation.enemies.len(), 120);
        assert_eq!(state.formation.last_shot_at, 5000.0);
        assert_eq!(state.barriers.len(), 4);
        assert_eq!(state.bonus.last_spawn_at, 5000.0);
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_restart_twice_matches_once() {
        let mut once = GameState::new(9, 0.0);
        once.progression.score = 500;
        end_run(&mut once, LossCause::Invasion);
        let mut twice = once.clone();

        restart(&mut once, 100.0);
        restart(&mut twice, 100.0);
        restart(&mut twice, 100.0);

        assert_eq!(once.progression, twice.progression);
        assert_eq!(once.phase, twice.phase);
        assert_eq!(once.player.lives, twice.player.lives);
        assert_eq!(once.formation.enemies.len(), twice.formation.enemies.len());
        assert_eq!(once.barriers.len(), twice.barriers.len());
    }
}
