//! Star Invaders entry point
//!
//! Headless native runner: drives the simulation from a fixed-step frame
//! clock, feeds it through the input mailbox and prints text frames.

use std::path::PathBuf;

use star_invaders::Settings;
use star_invaders::platform::{Command, FrameClock, InputMailbox};
use star_invaders::renderer::{Snapshot, text};
use star_invaders::sim::{GameEvent, GameState, tick};

/// Simple demo pilot: track the nearest column of enemies and keep firing
fn autopilot(state: &GameState, mailbox: &mut InputMailbox) {
    if state.is_game_over() {
        mailbox.post(Command::Restart);
        return;
    }

    let ship_center = state.player.pos.x + state.player.size.x / 2.0;
    let target = state
        .formation
        .alive()
        .map(|e| e.pos.x + e.size.x / 2.0)
        .min_by(|a, b| {
            (a - ship_center)
                .abs()
                .partial_cmp(&(b - ship_center).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let offset = target.map(|x| x - ship_center).unwrap_or(0.0);
    let direction = if offset > state.player.speed {
        1
    } else if offset < -state.player.speed {
        -1
    } else {
        0
    };
    mailbox.post(Command::MoveLeft(direction < 0));
    mailbox.post(Command::MoveRight(direction > 0));
    mailbox.post(Command::Fire);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());

    let seed = settings.resolve_seed();
    log::info!("Star Invaders (native) starting with seed {}", seed);

    let mut clock = FrameClock::default();
    let mut mailbox = InputMailbox::new();
    let mut state = GameState::new(seed, clock.now_ms());
    let mut host_ms = 0.0;
    clock.advance(host_ms);

    let mut best_score = 0;
    for frame in 1..=settings.max_frames {
        host_ms += settings.frame_ms;
        if settings.autopilot {
            autopilot(&state, &mut mailbox);
        }

        for now_ms in clock.advance(host_ms) {
            let input = mailbox.take();
            tick(&mut state, &input, now_ms);
            for event in &state.events {
                if let GameEvent::GameOver { cause } = event {
                    log::info!("Run ended by {:?} at frame {}", cause, frame);
                }
            }
        }
        best_score = best_score.max(state.score());

        if settings.render_every > 0 && frame % settings.render_every == 0 {
            let snapshot = Snapshot::capture(&state);
            println!(
                "{}",
                text::render(&snapshot, settings.render_cols, settings.render_rows)
            );
        }
    }

    let snapshot = Snapshot::capture(&state);
    println!("{}", snapshot.hud_line());
    log::info!(
        "Finished {} frames, best score {}",
        settings.max_frames,
        best_score
    );
}
