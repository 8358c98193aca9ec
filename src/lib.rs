//! Tower Climb - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation, camera)
//! - `renderer`: Abstract draw-command emission with missing-asset fallback
//! - `audio`: Named sound events forwarded to an audio backend
//! - `platform`: Input sources and frame timing
//! - `tuning`: Data-driven game balance
//! - `settings`: User configuration loaded from JSON

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate. All per-tick tuning values are expressed at this rate.
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest real frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Logical window size (world units == pixels)
    pub const WINDOW_WIDTH: f32 = 600.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;

    /// Side walls, one on each edge of the playfield
    pub const WALL_WIDTH: f32 = 75.0;

    /// Character sprite box
    pub const CHAR_WIDTH: f32 = 50.0;
    pub const CHAR_HEIGHT: f32 = 50.0;
    pub const CHAR_HALF_WIDTH: f32 = CHAR_WIDTH / 2.0;
    pub const CHAR_HALF_HEIGHT: f32 = CHAR_HEIGHT / 2.0;

    /// Ground plane (bottom of the character never goes below this + half height)
    pub const GROUND_Y: f32 = 0.0;
    /// The ground slab spanning the whole window
    pub const GROUND_PLATFORM_HEIGHT: f32 = 50.0;

    /// Horizontal clamp for the character center
    pub const PLAYER_MIN_X: f32 = WALL_WIDTH + CHAR_HALF_WIDTH;
    pub const PLAYER_MAX_X: f32 = WINDOW_WIDTH - WALL_WIDTH - CHAR_HALF_WIDTH;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
