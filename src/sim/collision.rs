//! Collision detection and resolution
//!
//! Runs once per tick after motion. The resolution order is fixed so that
//! scoring is deterministic:
//! 1. player bullets vs bonus target
//! 2. player bullets vs enemies
//! 3. all bullets vs barriers
//! 4. enemy bullets vs player
//! 5. sweep destroyed barriers

use super::progression::{end_run, register_kill};
use super::rect::Bounded;
use super::state::{EnemyKind, GameEvent, GameState, LossCause};
use super::wave::spawn_split_pair;
use crate::consts::*;

/// Tally of what a resolution pass did (for logging and tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bonus_hits: u32,
    pub enemy_hits: u32,
    pub kills: u32,
    pub spawned: u32,
    pub barrier_hits: u32,
    pub player_hits: u32,
    pub barriers_destroyed: u32,
}

/// Resolve every interaction for this tick
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    bullets_vs_bonus(state, &mut report);
    bullets_vs_enemies(state, &mut report);
    bullets_vs_barriers(state, &mut report);
    enemy_bullets_vs_player(state, &mut report);
    sweep_barriers(state, &mut report);

    if report != CollisionReport::default() {
        log::trace!("Collisions: {:?}", report);
    }
    report
}

fn bullets_vs_bonus(state: &mut GameState, report: &mut CollisionReport) {
    if !state.bonus.active {
        return;
    }

    let mut destroyed = false;
    let bonus = &mut state.bonus;
    state.bullets.retain(|bullet| {
        if destroyed || !bullet.overlaps(&*bonus) {
            return true;
        }
        report.bonus_hits += 1;
        bonus.health = bonus.health.saturating_sub(1);
        if bonus.health == 0 {
            bonus.active = false;
            destroyed = true;
        }
        false
    });

    if destroyed {
        state.player.lives = (state.player.lives + 1).min(MAX_LIVES);
        state.progression.score += UFO_BONUS_POINTS;
        log::info!("Bonus target destroyed, lives now {}", state.player.lives);
        state.emit(GameEvent::BonusDestroyed);
    }
}

fn bullets_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    // Offspring are staged and appended after the pass so they cannot be hit
    // in the frame they appear.
    let mut staged = Vec::new();
    let mut consumed = vec![false; state.bullets.len()];
    let stage = state.progression.stage;

    for (index, spent) in consumed.iter_mut().enumerate() {
        let bullet = state.bullets[index].bounds();
        let damage = state.bullets[index].damage;

        for enemy_index in 0..state.formation.enemies.len() {
            let enemy = &mut state.formation.enemies[enemy_index];
            if !enemy.alive || !bullet.overlaps(&enemy.bounds()) {
                continue;
            }

            report.enemy_hits += 1;
            *spent = true;
            if enemy.take_damage(damage) {
                let kind = enemy.kind;
                let origin = enemy.pos;
                report.kills += 1;
                register_kill(state, kind);
                if kind == EnemyKind::Splitter {
                    staged.extend(spawn_split_pair(origin, stage));
                    report.spawned += 2;
                    state.emit(GameEvent::EnemySplit { at: origin });
                }
            }
        }

        // Piercing bullets survive their hits
        if *spent && state.progression.power_level >= PIERCE_POWER_LEVEL {
            *spent = false;
        }
    }

    let mut flags = consumed.into_iter();
    state.bullets.retain(|_| !flags.next().unwrap_or(false));
    state.formation.enemies.extend(staged);
}

fn bullets_vs_barriers(state: &mut GameState, report: &mut CollisionReport) {
    for barrier in &mut state.barriers {
        state.bullets.retain(|bullet| {
            if bullet.overlaps(&*barrier) {
                barrier.hit();
                report.barrier_hits += 1;
                false
            } else {
                true
            }
        });
        state.enemy_bullets.retain(|bullet| {
            if bullet.overlaps(&*barrier) {
                barrier.hit();
                report.barrier_hits += 1;
                false
            } else {
                true
            }
        });
    }
}

fn enemy_bullets_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let player = &mut state.player;
    let mut hits = 0;
    state.enemy_bullets.retain(|bullet| {
        if bullet.overlaps(&*player) {
            player.lives = player.lives.saturating_sub(1);
            hits += 1;
            false
        } else {
            true
        }
    });

    if hits == 0 {
        return;
    }
    report.player_hits += hits;
    let lives = state.player.lives;
    log::debug!("Player hit {} time(s), {} lives left", hits, lives);
    state.emit(GameEvent::PlayerHit { lives });
    if lives == 0 {
        end_run(state, LossCause::Attrition);
    }
}

fn sweep_barriers(state: &mut GameState, report: &mut CollisionReport) {
    let before = state.barriers.len();
    state.barriers.retain(|b| !b.is_destroyed());
    let removed = (before - state.barriers.len()) as u32;
    report.barriers_destroyed += removed;
    for _ in 0..removed {
        state.emit(GameEvent::BarrierDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy, EnemyBullet, GamePhase};
    use crate::sim::wave::enemy_health;
    use glam::Vec2;

    /// A state with no enemies, barriers or bullets
    fn empty_state() -> GameState {
        let mut state = GameState::new(1, 0.0);
        state.formation.enemies.clear();
        state.barriers.clear();
        state
    }

    fn bullet_at(state: &GameState, x: f32, y: f32) -> Bullet {
        let mut bullet = Bullet::fired_by(&state.player, state.power_level(), 0.0);
        bullet.pos = Vec2::new(x, y);
        bullet
    }

    fn enemy_at(kind: EnemyKind, x: f32, y: f32, health: u32) -> Enemy {
        Enemy::new(kind, Vec2::new(x, y), Vec2::splat(40.0), health)
    }

    #[test]
    fn test_normal_enemy_one_hit_kill() {
        let mut state = empty_state();
        state.formation.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 100.0, 1));
        let bullet = bullet_at(&state, 110.0, 110.0);
        state.bullets.push(bullet);

        let report = resolve(&mut state);

        let enemy = &state.formation.enemies[0];
        assert!(!enemy.alive);
        assert_eq!(enemy.health, 0);
        assert_eq!(state.score(), 100);
        assert_eq!(state.progression.killed_count, 1);
        assert!(state.bullets.is_empty());
        assert_eq!(report.kills, 1);
    }

    #[test]
    fn test_damage_scales_with_power() {
        let mut state = empty_state();
        state.progression.power_level = 5;
        state.formation.enemies.push(enemy_at(EnemyKind::Armored, 100.0, 100.0, 3));
        let bullet = bullet_at(&state, 110.0, 110.0);
        assert_eq!(bullet.damage, 2);
        state.bullets.push(bullet);

        resolve(&mut state);

        assert_eq!(state.formation.enemies[0].health, 1);
        assert!(state.formation.enemies[0].alive);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_low_power_bullet_damages_every_overlap_then_is_consumed() {
        let mut state = empty_state();
        // Inner offspring of two adjacent splitters overlap by a few pixels
        let mut left = enemy_at(EnemyKind::Normal, 320.0, 200.0, 1);
        left.size = Vec2::splat(24.0);
        let mut right = enemy_at(EnemyKind::Normal, 340.0, 200.0, 1);
        right.size = Vec2::splat(24.0);
        state.formation.enemies.push(left);
        state.formation.enemies.push(right);
        let bullet = bullet_at(&state, 338.0, 205.0);
        assert_eq!(bullet.damage, 1);
        state.bullets.push(bullet);

        let report = resolve(&mut state);

        assert_eq!(report.enemy_hits, 2);
        assert!(state.formation.enemies.iter().all(|e| !e.alive));
        assert_eq!(state.score(), 200);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_low_power_bullet_missing_everything_survives() {
        let mut state = empty_state();
        state.formation.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 100.0, 1));
        let bullet = bullet_at(&state, 600.0, 400.0);
        state.bullets.push(bullet);

        resolve(&mut state);

        assert!(state.formation.enemies[0].alive);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_high_power_bullet_passes_through() {
        let mut state = empty_state();
        state.progression.power_level = 6;
        state.formation.enemies.push(enemy_at(EnemyKind::Normal, 100.0, 100.0, 1));
        state.formation.enemies.push(enemy_at(EnemyKind::Normal, 105.0, 100.0, 1));
        let bullet = bullet_at(&state, 110.0, 110.0);
        state.bullets.push(bullet);

        resolve(&mut state);

        assert!(state.formation.enemies.iter().all(|e| !e.alive));
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score(), 200);
    }

    #[test]
    fn test_splitter_spawns_two_offspring_after_pass() {
        let mut state = empty_state();
        state.progression.stage = 3;
        state.progression.power_level = 6;
        state.formation.enemies.push(enemy_at(EnemyKind::Splitter, 300.0, 200.0, 1));
        // Wide piercing bullet covering the splitter and both offspring spots
        let mut bullet = bullet_at(&state, 260.0, 200.0);
        bullet.size = Vec2::new(140.0, 40.0);
        state.bullets.push(bullet);

        let report = resolve(&mut state);

        assert_eq!(report.kills, 1);
        assert_eq!(report.spawned, 2);
        assert_eq!(state.formation.enemies.len(), 3);
        let children = &state.formation.enemies[1..];
        assert_eq!(children[0].pos, Vec2::new(280.0, 200.0));
        assert_eq!(children[1].pos, Vec2::new(320.0, 200.0));
        for child in children {
            assert!(child.alive);
            assert_eq!(child.kind, EnemyKind::Normal);
            assert_eq!(child.health, enemy_health(EnemyKind::Normal, 3));
        }
        // Splitter worth 200 * stage 3
        assert_eq!(state.score(), 600);
    }

    #[test]
    fn test_bonus_target_destroyed() {
        let mut state = empty_state();
        state.player.lives = 2;
        state.bonus.activate(0.0);
        state.bonus.pos.x = 500.0;
        state.bonus.health = 2;
        for _ in 0..4 {
            let bullet = bullet_at(&state, 510.0, 25.0);
            state.bullets.push(bullet);
        }

        let report = resolve(&mut state);

        assert!(!state.bonus.active);
        assert_eq!(report.bonus_hits, 2);
        assert_eq!(state.score(), 2000);
        assert_eq!(state.player.lives, 3);
        // Remaining bullets are untouched once the target is gone
        assert_eq!(state.bullets.len(), 2);
        assert!(state.events.contains(&GameEvent::BonusDestroyed));
    }

    #[test]
    fn test_bonus_life_never_exceeds_max() {
        let mut state = empty_state();
        state.bonus.activate(0.0);
        state.bonus.pos.x = 500.0;
        state.bonus.health = 1;
        let bullet = bullet_at(&state, 510.0, 25.0);
        state.bullets.push(bullet);

        resolve(&mut state);

        assert_eq!(state.player.lives, 3);
        assert_eq!(state.score(), 2000);
    }

    #[test]
    fn test_barrier_absorbs_both_sides() {
        let mut state = GameState::new(1, 0.0);
        state.formation.enemies.clear();
        let barrier_pos = state.barriers[0].pos;
        let mut strong = bullet_at(&state, barrier_pos.x + 10.0, barrier_pos.y + 10.0);
        strong.damage = 5;
        state.bullets.push(strong);
        state
            .enemy_bullets
            .push(EnemyBullet::fired_from(barrier_pos - Vec2::new(0.0, 30.0), 1));

        let report = resolve(&mut state);

        assert_eq!(report.barrier_hits, 2);
        assert_eq!(state.barriers[0].health, 4);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_destroyed_barrier_removed() {
        let mut state = GameState::new(1, 0.0);
        state.formation.enemies.clear();
        state.barriers[1].health = 1;
        let pos = state.barriers[1].pos;
        let bullet = bullet_at(&state, pos.x + 5.0, pos.y + 5.0);
        state.bullets.push(bullet);

        let report = resolve(&mut state);

        assert_eq!(report.barriers_destroyed, 1);
        assert_eq!(state.barriers.len(), 3);
        assert!(state.barriers.iter().all(|b| b.health == 6));
    }

    #[test]
    fn test_last_life_lost_ends_game() {
        let mut state = empty_state();
        state.player.lives = 1;
        let mut shot = EnemyBullet::fired_from(Vec2::ZERO, 1);
        shot.pos = state.player.pos + Vec2::new(10.0, 5.0);
        state.enemy_bullets.push(shot);

        resolve(&mut state);

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_player_hit_keeps_playing() {
        let mut state = empty_state();
        let mut shot = EnemyBullet::fired_from(Vec2::ZERO, 1);
        shot.pos = state.player.pos + Vec2::new(10.0, 5.0);
        state.enemy_bullets.push(shot);

        resolve(&mut state);

        assert_eq!(state.player.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::PlayerHit { lives: 2 }]);
    }
}
