//! Collision detection against platforms and the ground plane
//!
//! Queries here are pure. Anything that moves the player (ground clamp,
//! landing snap) is a separate, explicitly named step.

use super::state::{Platform, Player};
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingResult {
    /// Whether the player came to rest on a platform
    pub landed: bool,
    /// The platform landed on (if any)
    pub platform: Option<Platform>,
}

impl LandingResult {
    pub fn miss() -> Self {
        Self {
            landed: false,
            platform: None,
        }
    }

    fn hit(platform: Platform) -> Self {
        Self {
            landed: true,
            platform: Some(platform),
        }
    }
}

/// Player center height when resting on the ground plane
#[inline]
pub fn ground_rest_y() -> f32 {
    GROUND_Y + CHAR_HALF_HEIGHT
}

/// Strict overlap between the player's box and a platform, horizontally
#[inline]
pub fn overlaps_horizontally(player: &Player, platform: &Platform) -> bool {
    player.left() < platform.right() && player.right() > platform.x
}

/// Center height the player would rest at if it is standing on something.
///
/// Ground counts when the player is at or below rest height; a platform
/// counts when the feet are within `support_band` of its top. Platforms are
/// checked in creation order, first match wins.
pub fn support_height(player: &Player, platforms: &[Platform], tuning: &Tuning) -> Option<f32> {
    if player.pos.y <= ground_rest_y() {
        return Some(ground_rest_y());
    }

    let bottom = player.bottom();
    platforms
        .iter()
        .find(|p| {
            overlaps_horizontally(player, p)
                && bottom >= p.top() - tuning.support_band
                && bottom <= p.top() + tuning.support_band
        })
        .map(|p| p.top() + CHAR_HALF_HEIGHT)
}

/// Whether the player is standing on the ground or a platform
pub fn is_on_ground_or_platform(player: &Player, platforms: &[Platform], tuning: &Tuning) -> bool {
    support_height(player, platforms, tuning).is_some()
}

/// Keep the player from sinking through the ground plane.
///
/// Returns true if a clamp happened (velocity is zeroed too).
pub fn clamp_to_ground(player: &mut Player) -> bool {
    if player.pos.y <= ground_rest_y() {
        player.pos.y = ground_rest_y();
        player.vel_y = 0.0;
        true
    } else {
        false
    }
}

/// Catch a descending player on the first platform whose top lies in the
/// landing band under its feet.
///
/// Only evaluated while `vel_y < 0`. The band reaches `landing_below` units
/// under the top surface and `landing_above` units over it. On a hit the
/// player is snapped onto the surface with zero vertical velocity.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform], tuning: &Tuning) -> LandingResult {
    if player.vel_y >= 0.0 {
        return LandingResult::miss();
    }

    let bottom = player.bottom();
    let hit = platforms.iter().find(|p| {
        overlaps_horizontally(player, p)
            && bottom >= p.top() - tuning.landing_below
            && bottom <= p.top() + tuning.landing_above
    });

    match hit {
        Some(platform) => {
            player.pos.y = platform.top() + CHAR_HALF_HEIGHT;
            player.vel_y = 0.0;
            LandingResult::hit(*platform)
        }
        None => LandingResult::miss(),
    }
}
