//! Tower Climb entry point
//!
//! Headless native runner: loads settings, drives the frame loop with the
//! autopilot (or a single start press), and reports the result. Drawing and
//! audio go to logging backends.

use std::time::{SystemTime, UNIX_EPOCH};

use tower_climb::audio::{AudioManager, LogAudio};
use tower_climb::consts::{SIM_DT, TICK_HZ};
use tower_climb::game::{RunOptions, run};
use tower_climb::platform::{Autopilot, FramePacer, InputSource, ScriptedInput, SteppedClock};
use tower_climb::renderer::{AssetCatalog, CountingSink};
use tower_climb::{Game, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tower Climb (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = Settings::load_or_default(Settings::config_path(&args).as_deref());
    let seed = settings.seed.unwrap_or_else(time_seed);

    let audio = AudioManager::new(Box::new(LogAudio));
    let mut game = Game::new(&settings, seed, AssetCatalog::new(), audio);

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot::default())
    } else {
        Box::new(ScriptedInput::start_only())
    };
    let mut sink = CountingSink::default();
    let options = RunOptions {
        max_frames: settings.max_frames,
        stop_on_game_over: true,
    };

    let summary = if settings.pace_frames {
        run(&mut game, input.as_mut(), &mut sink, &mut FramePacer::new(TICK_HZ), options)
    } else {
        run(&mut game, input.as_mut(), &mut sink, &mut SteppedClock::new(SIM_DT), options)
    };

    log::info!(
        "Ran {} frames ({} draw commands)",
        summary.frames,
        sink.commands
    );
    println!(
        "Seed {seed}: score {} ({} jumps), max height {:.0}{}",
        summary.score,
        summary.successful_jumps,
        summary.max_height,
        if summary.fell_off_screen { ", fell off screen" } else { "" }
    );
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
