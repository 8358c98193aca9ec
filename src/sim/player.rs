//! Player kinematics: horizontal input, wall bounces, gravity and jumps

use super::collision;
use super::state::{Platform, Player};
use crate::consts::*;
use crate::tuning::Tuning;

/// Directional intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

/// Advance an active bounce by one tick.
///
/// The timer counts down first, then the player is kicked by
/// `direction * bounce_speed * timer / bounce_ticks`, so the final tick
/// (timer reaching 0) adds no displacement and ends the bounce.
pub fn update_bounce(player: &mut Player, tuning: &Tuning) {
    let bounce = &mut player.bounce;
    if !bounce.active {
        return;
    }

    bounce.timer = bounce.timer.saturating_sub(1);
    let strength = bounce.timer as f32 / tuning.bounce_ticks as f32;
    player.pos.x += bounce.direction as f32 * tuning.bounce_speed * strength;
    player.pos.x = player.pos.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);

    if bounce.timer == 0 {
        bounce.active = false;
    }
}

/// Apply one tick of horizontal motion.
///
/// While a bounce is running it owns horizontal motion and input is ignored.
/// Otherwise held directions move the player; running into a wall clamps the
/// position and arms a bounce away from that wall. Returns whether the player
/// moved horizontally this tick.
pub fn apply_movement(player: &mut Player, steer: Steering, tuning: &Tuning) -> bool {
    if player.bounce.active {
        update_bounce(player, tuning);
        return true;
    }

    let mut moving = false;

    if steer.right {
        player.pos.x += tuning.move_speed;
        player.facing_left = false;
        moving = true;
        if player.pos.x > PLAYER_MAX_X {
            player.pos.x = PLAYER_MAX_X;
            player.bounce.arm(-1, tuning.bounce_ticks);
        }
    }

    if steer.left {
        player.pos.x -= tuning.move_speed;
        player.facing_left = true;
        moving = true;
        if player.pos.x < PLAYER_MIN_X {
            player.pos.x = PLAYER_MIN_X;
            player.bounce.arm(1, tuning.bounce_ticks);
        }
    }

    moving
}

/// Gravity then position, in that order
pub fn integrate(player: &mut Player, tuning: &Tuning) {
    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;
}

/// Start a jump if the button is held and the player is standing on something.
///
/// The player is first settled onto the supporting surface, then launched.
/// Returns true if a jump started.
pub fn try_jump(player: &mut Player, platforms: &[Platform], tuning: &Tuning, pressed: bool) -> bool {
    if !pressed || player.is_jumping {
        return false;
    }

    let Some(rest_y) = collision::support_height(player, platforms, tuning) else {
        return false;
    };

    player.pos.y = rest_y;
    player.vel_y = tuning.jump_speed;
    player.is_jumping = true;
    true
}
