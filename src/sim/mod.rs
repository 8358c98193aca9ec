//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform creation order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use camera::VisibleRange;
pub use collision::{LandingResult, is_on_ground_or_platform, resolve_landing, support_height};
pub use level::{extend_level, generate_platforms, generate_run};
pub use player::Steering;
pub use state::{
    Bounce, Camera, GameEvent, GameState, Platform, Player, PlayerMode, ScoreTracker,
};
pub use tick::{TickInput, tick};
