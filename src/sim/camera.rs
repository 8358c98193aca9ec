//! Scroll controller
//!
//! The camera climbs at a constant (but slowly increasing) speed once play
//! begins, and snaps upward whenever the player gets too close to the top.

use super::state::Camera;
use crate::consts::*;
use crate::tuning::Tuning;

/// World-space vertical extent currently on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub top: f32,
    pub bottom: f32,
}

impl VisibleRange {
    /// The screen-sized window whose bottom edge sits at `scroll_y`
    pub fn at(scroll_y: f32) -> Self {
        Self {
            top: scroll_y + WINDOW_HEIGHT,
            bottom: scroll_y,
        }
    }

    /// Grow the range by margins below and above
    pub fn expanded(&self, below: f32, above: f32) -> Self {
        Self {
            top: self.top + above,
            bottom: self.bottom - below,
        }
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.bottom && y <= self.top
    }
}

impl Camera {
    /// Unconditional per-tick scroll
    pub fn advance(&mut self) {
        self.scroll_y += self.speed;
    }

    /// Snap up to a player climbing above the follow line
    pub fn follow(&mut self, player_y: f32, tuning: &Tuning) {
        let threshold = WINDOW_HEIGHT * tuning.camera_follow_fraction;
        if player_y > self.scroll_y + threshold {
            self.scroll_y = player_y - threshold;
        }
    }

    /// Permanent speed increase after a difficulty step
    pub fn speed_up(&mut self, tuning: &Tuning) {
        self.speed += tuning.camera_speed_step;
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange::at(self.scroll_y)
    }

    /// The player's sprite has dropped entirely under the bottom of the view
    pub fn has_lost(&self, player_y: f32) -> bool {
        player_y + CHAR_HALF_HEIGHT < self.scroll_y
    }
}
