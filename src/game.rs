//! Frame driver
//!
//! Per presented frame: poll input, run as many fixed simulation ticks as the
//! accumulated real time allows, forward sim events to audio, emit the render
//! commands, present, then pace.

use crate::audio::AudioManager;
use crate::consts::SIM_DT;
use crate::platform::{FixedTimestep, FrameClock, InputSource, InputState};
use crate::renderer::{AssetCatalog, Overlay, RenderSink, build_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Rolling frames-per-second over the last 60 presented frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f32; 60],
    frame_index: usize,
    filled: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            filled: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, dt: f32) {
        self.frame_times[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        self.filled = (self.filled + 1).min(self.frame_times.len());
    }

    pub fn fps(&self) -> u32 {
        let elapsed: f32 = self.frame_times[..self.filled].iter().sum();
        if elapsed <= 0.0 {
            return 0;
        }
        (self.filled as f32 / elapsed).round() as u32
    }
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub assets: AssetCatalog,
    pub audio: AudioManager,
    timestep: FixedTimestep,
    /// Keys seen on frames too short to run a tick
    pending: TickInput,
    fps: FpsCounter,
    show_fps: bool,
}

impl Game {
    pub fn new(settings: &Settings, seed: u64, assets: AssetCatalog, mut audio: AudioManager) -> Self {
        settings.apply_audio(&mut audio);

        let missing = assets.missing();
        if !missing.is_empty() {
            log::warn!("Missing sprites drawn as placeholders: {missing:?}");
        }

        let mut game = Self {
            state: GameState::new(seed, settings.tuning.clone()),
            assets,
            audio,
            timestep: FixedTimestep::new(SIM_DT),
            pending: TickInput::default(),
            fps: FpsCounter::default(),
            show_fps: settings.show_fps,
        };
        game.dispatch_events();
        game
    }

    /// Run one presented frame.
    ///
    /// Returns false if the input asked to quit; in that case nothing is
    /// simulated or drawn.
    pub fn frame(&mut self, input: InputState, dt: f32, sink: &mut dyn RenderSink) -> bool {
        if input.quit {
            log::info!("Quit requested");
            return false;
        }

        let tick_input = input.tick_input();
        self.pending.move_left |= tick_input.move_left;
        self.pending.move_right |= tick_input.move_right;
        self.pending.jump |= tick_input.jump;

        let steps = self.timestep.advance(dt);
        for step in 0..steps {
            // The first tick consumes everything held since the last one
            let input = if step == 0 {
                std::mem::take(&mut self.pending)
            } else {
                tick_input
            };
            tick(&mut self.state, &input);
            self.dispatch_events();
        }

        self.fps.record(dt);
        let overlay = Overlay {
            fps: self.show_fps.then(|| self.fps.fps()),
        };
        build_frame(&self.state, &self.assets, overlay, self.timestep.alpha()).submit(sink);
        true
    }

    /// Forward pending sim events to audio
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::SpeedUp { speed } = event {
                log::debug!("Camera speed now {speed:.1}");
            }
            self.audio.handle(&event);
        }
    }

    /// Abandon the current session and start over
    pub fn restart(&mut self, seed: u64) {
        if self.audio.music_playing() {
            self.audio.play(crate::audio::SoundEvent::GameplayLoopStop);
        }
        self.state.reset(seed);
        self.timestep.reset();
        self.pending = TickInput::default();
        self.dispatch_events();
        log::info!("Restarted with seed {seed}");
    }
}

/// How long the driver loop keeps going
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub max_frames: Option<u64>,
    /// Leave the loop on the first frame after the fall
    pub stop_on_game_over: bool,
}

/// Outcome of a driver run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u32,
    pub successful_jumps: u32,
    pub max_height: f32,
    pub fell_off_screen: bool,
}

/// Drive frames until quit, the frame limit, or (optionally) game over
pub fn run(
    game: &mut Game,
    input: &mut dyn InputSource,
    sink: &mut dyn RenderSink,
    clock: &mut dyn FrameClock,
    options: RunOptions,
) -> RunSummary {
    let mut frames = 0;

    loop {
        if options.max_frames.is_some_and(|max| frames >= max) {
            break;
        }

        let dt = clock.begin_frame();
        let keys = input.poll(&game.state);
        if !game.frame(keys, dt, sink) {
            break;
        }
        frames += 1;
        clock.end_frame();

        if options.stop_on_game_over && game.state.fell_off_screen {
            break;
        }
    }

    RunSummary {
        frames,
        score: game.state.score.score,
        successful_jumps: game.state.score.successful_jumps,
        max_height: game.state.max_height,
        fell_off_screen: game.state.fell_off_screen,
    }
}
