//! Data-driven game balance
//!
//! Every value is expressed per simulation tick (60 Hz). Defaults reproduce
//! the classic feel of the game; a JSON settings file may override any field.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Inclusive integer range used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRange {
    pub min: u32,
    pub max: u32,
}

impl SpanRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min as f32 && value <= self.max as f32
    }
}

/// Physics, camera and level-generation balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Vertical acceleration applied every tick (negative = down)
    pub gravity: f32,
    /// Upward velocity given by a jump
    pub jump_speed: f32,
    /// Horizontal displacement per tick while a direction is held
    pub move_speed: f32,
    /// Peak horizontal kick of a wall bounce
    pub bounce_speed: f32,
    /// Length of a wall bounce in ticks
    pub bounce_ticks: u32,

    // === Landing ===
    /// How far the feet may sink below a platform top and still land
    pub landing_below: f32,
    /// How far above a platform top the feet may be and still land
    pub landing_above: f32,
    /// Half-height of the band in which the player counts as standing on a platform
    pub support_band: f32,

    // === Camera ===
    pub camera_base_speed: f32,
    /// Added to camera speed at every difficulty step
    pub camera_speed_step: f32,
    /// Successful jumps between difficulty steps
    pub jumps_per_speed_step: u32,
    /// Camera snaps up when the player climbs above this fraction of the screen
    pub camera_follow_fraction: f32,

    // === Level generation ===
    pub platform_width: SpanRange,
    pub platform_height: f32,
    /// Vertical gap between consecutive platforms within one run
    pub platform_gap: SpanRange,
    /// Gap between the highest existing platform and the first one of a new run
    pub run_gap: SpanRange,
    /// Keep platforms generated this many screens above the camera
    pub lookahead_screens: f32,
    /// Initial level height, in screens
    pub initial_screens: f32,
    /// Drop platforms that fall more than one screen below the camera
    pub prune_platforms: bool,

    // === Rendering ===
    /// Platforms this far below the camera are still drawn
    pub render_margin_below: f32,
    /// Platforms this far above the top of the screen are still drawn
    pub render_margin_above: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: -0.6,
            jump_speed: 15.0,
            move_speed: 3.0,
            bounce_speed: 8.0,
            bounce_ticks: 10,

            landing_below: 10.0,
            landing_above: 20.0,
            support_band: 10.0,

            camera_base_speed: 1.5,
            camera_speed_step: 0.5,
            jumps_per_speed_step: 10,
            camera_follow_fraction: 0.6,

            platform_width: SpanRange::new(100, 150),
            platform_height: 40.0,
            platform_gap: SpanRange::new(80, 150),
            run_gap: SpanRange::new(100, 150),
            lookahead_screens: 2.0,
            initial_screens: 3.0,
            prune_platforms: false,

            render_margin_below: 100.0,
            render_margin_above: 200.0,
        }
    }
}

impl Tuning {
    /// Reject values the simulation treats as invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [
            ("platform_width", self.platform_width),
            ("platform_gap", self.platform_gap),
            ("run_gap", self.run_gap),
        ] {
            if range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "{name}: min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }

        let playfield = WINDOW_WIDTH - 2.0 * WALL_WIDTH;
        if self.platform_width.max as f32 > playfield {
            return Err(ConfigError::Invalid(format!(
                "platform_width.max {} does not fit the {playfield} unit playfield",
                self.platform_width.max
            )));
        }
        if self.platform_gap.min == 0 || self.run_gap.min == 0 {
            return Err(ConfigError::Invalid(
                "platform gaps must be positive".to_string(),
            ));
        }
        if self.bounce_ticks == 0 {
            return Err(ConfigError::Invalid("bounce_ticks must be positive".to_string()));
        }
        if self.jumps_per_speed_step == 0 {
            return Err(ConfigError::Invalid(
                "jumps_per_speed_step must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.camera_follow_fraction) {
            return Err(ConfigError::Invalid(format!(
                "camera_follow_fraction {} outside [0, 1]",
                self.camera_follow_fraction
            )));
        }
        Ok(())
    }

    /// Camera speed after `jumps` successful landings
    pub fn camera_speed_for(&self, jumps: u32) -> f32 {
        let steps = jumps / self.jumps_per_speed_step;
        self.camera_base_speed + self.camera_speed_step * steps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_camera_speed_formula() {
        let tuning = Tuning::default();
        assert_eq!(tuning.camera_speed_for(0), 1.5);
        assert_eq!(tuning.camera_speed_for(9), 1.5);
        assert_eq!(tuning.camera_speed_for(10), 2.0);
        assert_eq!(tuning.camera_speed_for(25), 2.5);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let tuning = Tuning {
            platform_gap: SpanRange::new(150, 80),
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_platform_wider_than_playfield() {
        let tuning = Tuning {
            platform_width: SpanRange::new(100, 460),
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": -0.8 }"#).unwrap();
        assert_eq!(tuning.gravity, -0.8);
        assert_eq!(tuning.jump_speed, 15.0);
        assert_eq!(tuning.platform_width, SpanRange::new(100, 150));
    }
}
