//! Endless level generation
//!
//! Platforms are appended in runs, each run climbing from just above the
//! current highest platform up to a requested height. Vertical overlap between
//! platforms is allowed: only horizontal placement is randomized against the
//! walls, so dense stacks can occur.

use rand::Rng;

use super::state::{GameState, Platform};
use crate::consts::*;
use crate::tuning::Tuning;

/// Height of the highest platform (by bottom edge)
pub fn highest_platform_y(platforms: &[Platform]) -> Option<f32> {
    platforms.iter().map(|p| p.y).reduce(f32::max)
}

/// Append a run of platforms to the session's level.
///
/// Starts at `from_y` on an empty level, otherwise one run gap above the
/// highest existing platform. Returns the number of platforms added.
pub fn generate_platforms(state: &mut GameState, from_y: f32, to_y: f32) -> usize {
    let added = generate_run(
        &mut state.platforms,
        &mut state.rng,
        &state.tuning,
        from_y,
        to_y,
    );
    if added > 0 {
        log::debug!(
            "Generated {added} platforms up to y={to_y:.0} ({} total)",
            state.platforms.len()
        );
    }
    added
}

/// Generator core, independent of the session so it can be driven by any RNG
pub fn generate_run<R: Rng>(
    platforms: &mut Vec<Platform>,
    rng: &mut R,
    tuning: &Tuning,
    from_y: f32,
    to_y: f32,
) -> usize {
    let mut y = match highest_platform_y(platforms) {
        Some(top) => top + draw(rng, tuning.run_gap.min, tuning.run_gap.max),
        None => from_y,
    };

    let wall = WALL_WIDTH as u32;
    let window = WINDOW_WIDTH as u32;
    let mut added = 0;

    while y < to_y {
        let width = rng.random_range(tuning.platform_width.min..=tuning.platform_width.max);
        // Keep the whole slab between the walls
        let max_x = window - wall - width;
        let x = rng.random_range(wall..=max_x);

        platforms.push(Platform::new(
            x as f32,
            y,
            width as f32,
            tuning.platform_height,
        ));
        added += 1;

        y += draw(rng, tuning.platform_gap.min, tuning.platform_gap.max);
    }

    added
}

/// Keep the level stocked ahead of the camera.
///
/// Called once per tick; generates a new run whenever the highest platform
/// sits below `scroll + lookahead` screens.
pub fn extend_level(state: &mut GameState) -> usize {
    let scroll = state.camera.scroll_y;
    let horizon = scroll + WINDOW_HEIGHT * state.tuning.lookahead_screens;
    let added = match state.highest_platform_y() {
        Some(top) if top >= horizon => 0,
        Some(top) => generate_platforms(state, top, horizon),
        None => generate_platforms(state, scroll, horizon),
    };

    if state.tuning.prune_platforms {
        prune_below(state);
    }
    added
}

/// Drop platforms more than one screen below the camera.
///
/// Nothing down there can be reached: the player would already have
/// fallen out of view.
fn prune_below(state: &mut GameState) {
    let cutoff = state.camera.scroll_y - WINDOW_HEIGHT;
    let before = state.platforms.len();
    state.platforms.retain(|p| p.is_ground || p.top() >= cutoff);
    let removed = before - state.platforms.len();
    if removed > 0 {
        log::trace!("Pruned {removed} platforms below y={cutoff:.0}");
    }
}

fn draw<R: Rng>(rng: &mut R, min: u32, max: u32) -> f32 {
    rng.random_range(min..=max) as f32
}
