//! Bola-Bola headless runner
//!
//! Plays a game against the in-memory canvas with a simple autopilot that
//! chases the lowest ball. Useful for smoke-testing the simulation and for
//! watching the loop's log output (`RUST_LOG=debug`).
//!
//! Usage: `bola-bola [settings.json]`

use std::path::PathBuf;

use anyhow::Context;

use bola_bola::Settings;
use bola_bola::platform::{HeadlessCanvas, Key};
use bola_bola::sim::{Game, GameObject, GamePhase};

/// Give up after this many steps (about ten minutes of play)
const MAX_STEPS: u64 = 36_000;
/// Autopilot dead zone around the paddle center
const STEER_DEAD_ZONE: f32 = 8.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    log::info!("Bola-Bola (headless) starting...");

    let canvas = HeadlessCanvas::new(settings.field_width, settings.field_height);
    let step_ms = settings.tick_interval_ms;
    let mut game = Game::new(canvas, settings).context("failed to set up the game")?;

    let mut steps = 0;
    while !game.phase().is_terminal() && steps < MAX_STEPS {
        if game.phase() == GamePhase::AwaitingStart {
            game.key_pressed(Key::Space);
            game.key_released(Key::Space);
        }
        steer(&mut game);
        game.run_for(step_ms).context("round setup failed")?;
        steps += 1;
    }

    log::info!(
        "Finished: {:?} after {} ticks, {} lives, {} bricks left",
        game.phase(),
        game.ticks(),
        game.lives(),
        game.brick_count()
    );
    Ok(())
}

/// Hold Left/Right toward the lowest ball (the one closest to falling out)
fn steer(game: &mut Game<HeadlessCanvas>) {
    let canvas = game.canvas();
    let Some(paddle) = game.paddle().position(canvas) else {
        return;
    };
    let target = game
        .balls()
        .iter()
        .filter_map(|ball| ball.position(canvas))
        .max_by(|a, b| a.bottom.total_cmp(&b.bottom))
        .map(|b| b.center().x);

    let (left, right) = match target {
        Some(x) if x < paddle.center().x - STEER_DEAD_ZONE => (true, false),
        Some(x) if x > paddle.center().x + STEER_DEAD_ZONE => (false, true),
        _ => (false, false),
    };

    for (key, held) in [(Key::Left, left), (Key::Right, right)] {
        if held {
            game.key_pressed(key);
        } else {
            game.key_released(key);
        }
    }
}
