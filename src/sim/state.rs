//! Game state and core simulation types
//!
//! One `GameState` owns everything a session mutates. Nothing lives in
//! statics, so several sessions can run side by side (tests do exactly that).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level;
use crate::consts::*;
use crate::tuning::Tuning;

/// A static slab the player can stand on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// The full-width floor at the bottom of the tower
    pub is_ground: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_ground: false,
        }
    }

    /// The floor slab the session starts on
    pub fn ground() -> Self {
        Self {
            x: 0.0,
            y: GROUND_Y,
            width: WINDOW_WIDTH,
            height: GROUND_PLATFORM_HEIGHT,
            is_ground: true,
        }
    }

    /// Walkable surface height
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Scripted rebound after running into a side wall
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounce {
    pub active: bool,
    /// Ticks left, counts down to 0
    pub timer: u32,
    /// +1 pushes right (off the left wall), -1 pushes left
    pub direction: i32,
}

impl Bounce {
    /// Start a rebound of `ticks` length travelling in `direction`
    pub fn arm(&mut self, direction: i32, ticks: u32) {
        self.active = true;
        self.timer = ticks;
        self.direction = direction;
    }
}

/// The climbing character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Sprite center
    pub pos: Vec2,
    /// Position at the start of the current tick (render interpolation)
    pub prev_pos: Vec2,
    pub vel_y: f32,
    pub is_jumping: bool,
    pub facing_left: bool,
    /// Horizontal motion happened this tick (input or bounce)
    pub moving: bool,
    pub bounce: Bounce,
}

impl Player {
    /// Player standing on top of the ground slab, centered horizontally
    pub fn spawn() -> Self {
        let pos = Vec2::new(WINDOW_WIDTH / 2.0, Platform::ground().top() + CHAR_HALF_HEIGHT);
        Self {
            pos,
            prev_pos: pos,
            vel_y: 0.0,
            is_jumping: false,
            facing_left: false,
            moving: false,
            bounce: Bounce::default(),
        }
    }

    /// Feet height
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - CHAR_HALF_HEIGHT
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - CHAR_HALF_WIDTH
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + CHAR_HALF_WIDTH
    }
}

/// Vertical scroll of the world view
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World height at the bottom of the screen; never decreases
    pub scroll_y: f32,
    /// Scroll at the start of the current tick (render interpolation)
    pub prev_scroll_y: f32,
    /// Units scrolled per tick once the session has started
    pub speed: f32,
}

impl Camera {
    pub fn new(base_speed: f32) -> Self {
        Self {
            scroll_y: 0.0,
            prev_scroll_y: 0.0,
            speed: base_speed,
        }
    }
}

/// Landing counters that feed the score overlay and difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    pub score: u32,
    pub successful_jumps: u32,
}

impl ScoreTracker {
    /// Count one landing that ended a jump.
    ///
    /// Returns true when this landing crosses a difficulty step.
    pub fn record_landing(&mut self, jumps_per_step: u32) -> bool {
        self.successful_jumps += 1;
        self.score += 1;
        self.successful_jumps.is_multiple_of(jumps_per_step)
    }
}

/// Player state machine, derived from the session each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Idle,
    Walking,
    Jumping,
    Bouncing,
    /// Dropped below the camera; terminal for the session
    Falling,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh session exists (music should start)
    SessionCreated,
    /// First jump press, gameplay begins
    Started,
    Jumped,
    /// Feet came to rest on a platform
    Landed { score: u32 },
    /// Camera speed increased
    SpeedUp { speed: f32 },
    /// Player scrolled out of view; fires once per session
    GameOver { score: u32 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Level generation RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub player: Player,
    pub camera: Camera,
    pub score: ScoreTracker,
    /// Append-only, in creation order (not sorted by height)
    pub platforms: Vec<Platform>,
    /// Set by the first jump press; never cleared
    pub started: bool,
    /// Terminal: once set, physics and movement stop for good
    pub fell_off_screen: bool,
    /// The game-over sound has been requested
    pub game_over_announced: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Highest player center reached
    pub max_height: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::spawn();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            camera: Camera::new(tuning.camera_base_speed),
            tuning,
            max_height: player.pos.y,
            player,
            score: ScoreTracker::default(),
            platforms: vec![Platform::ground()],
            started: false,
            fell_off_screen: false,
            game_over_announced: false,
            time_ticks: 0,
            events: vec![GameEvent::SessionCreated],
        };

        let ground_top = Platform::ground().top();
        let initial_top = WINDOW_HEIGHT * state.tuning.initial_screens;
        level::generate_platforms(&mut state, ground_top, initial_top);

        log::info!(
            "New session (seed {seed}) with {} platforms",
            state.platforms.len()
        );
        state
    }

    /// Throw the session away and begin a fresh one, keeping the tuning
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::new(seed, tuning);
    }

    /// Current state-machine mode of the player
    pub fn player_mode(&self) -> PlayerMode {
        if self.fell_off_screen {
            PlayerMode::Falling
        } else if self.player.is_jumping {
            PlayerMode::Jumping
        } else if self.player.bounce.active {
            PlayerMode::Bouncing
        } else if self.player.moving {
            PlayerMode::Walking
        } else {
            PlayerMode::Idle
        }
    }

    /// Height of the highest platform generated so far
    pub fn highest_platform_y(&self) -> Option<f32> {
        level::highest_platform_y(&self.platforms)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(7, Tuning::default());
        assert!(!state.started);
        assert!(!state.fell_off_screen);
        assert_eq!(state.player.pos, Vec2::new(300.0, 75.0));
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.platforms[0].is_ground);
        assert!(state.platforms.len() > 10);
        assert!(state.highest_platform_y().unwrap() >= WINDOW_HEIGHT * 3.0 - 150.0);
        assert_eq!(state.events, vec![GameEvent::SessionCreated]);
    }

    #[test]
    fn test_reset_restores_fresh_session() {
        let mut state = GameState::new(7, Tuning::default());
        state.started = true;
        state.fell_off_screen = true;
        state.score.score = 12;
        state.camera.scroll_y = 900.0;

        state.reset(8);
        assert_eq!(state.seed, 8);
        assert!(!state.started);
        assert!(!state.fell_off_screen);
        assert_eq!(state.score, ScoreTracker::default());
        assert_eq!(state.camera.scroll_y, 0.0);
    }

    #[test]
    fn test_score_tracker_steps_every_tenth_landing() {
        let mut tracker = ScoreTracker::default();
        let steps: Vec<bool> = (0..20).map(|_| tracker.record_landing(10)).collect();
        assert_eq!(tracker.score, 20);
        assert_eq!(tracker.successful_jumps, 20);
        assert_eq!(steps.iter().filter(|s| **s).count(), 2);
        assert!(steps[9] && steps[19]);
    }

    #[test]
    fn test_player_mode_priority() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(state.player_mode(), PlayerMode::Idle);
        state.player.moving = true;
        assert_eq!(state.player_mode(), PlayerMode::Walking);
        state.player.bounce.arm(1, 10);
        assert_eq!(state.player_mode(), PlayerMode::Bouncing);
        state.player.is_jumping = true;
        assert_eq!(state.player_mode(), PlayerMode::Jumping);
        state.fell_off_screen = true;
        assert_eq!(state.player_mode(), PlayerMode::Falling);
    }
}
