//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one step, in a fixed order:
//! start check, horizontal movement, gravity, landing, jump, camera, fall
//! check, level extension.

use super::collision;
use super::level;
use super::player::{self, Steering};
use super::state::{GameEvent, GameState, Platform};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Held jump re-triggers on every tick the player is supported
    pub jump: bool,
}

impl TickInput {
    fn steering(&self) -> Steering {
        Steering {
            left: self.move_left,
            right: self.move_right,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.player.prev_pos = state.player.pos;
    state.camera.prev_scroll_y = state.camera.scroll_y;

    // Terminal: nothing moves after the fall
    if state.fell_off_screen {
        state.player.moving = false;
        return;
    }

    state.time_ticks += 1;

    // The press that starts the session only starts it
    let starting = !state.started && input.jump;
    if starting {
        start_session(state);
    }

    state.player.moving = player::apply_movement(&mut state.player, input.steering(), &state.tuning);

    if state.started && !starting {
        step_physics(state, input);
    }

    level::extend_level(state);
}

/// Begin play from the ground slab
fn start_session(state: &mut GameState) {
    state.started = true;
    state.player.pos.y = Platform::ground().top() + CHAR_HALF_HEIGHT;
    state.player.vel_y = 0.0;
    state.player.is_jumping = false;
    state.events.push(GameEvent::Started);
    log::info!("Game started (seed {})", state.seed);
}

fn step_physics(state: &mut GameState, input: &TickInput) {
    player::integrate(&mut state.player, &state.tuning);

    let landing = collision::resolve_landing(&mut state.player, &state.platforms, &state.tuning);
    if landing.landed {
        on_landing(state);
    } else if collision::clamp_to_ground(&mut state.player) {
        state.player.is_jumping = false;
    }

    if player::try_jump(&mut state.player, &state.platforms, &state.tuning, input.jump) {
        state.events.push(GameEvent::Jumped);
    }

    state.camera.advance();
    state.camera.follow(state.player.pos.y, &state.tuning);
    state.max_height = state.max_height.max(state.player.pos.y);

    if state.camera.has_lost(state.player.pos.y) {
        fall_off_screen(state);
    }
}

/// Score a landing that ended a jump, and raise difficulty on schedule
fn on_landing(state: &mut GameState) {
    if state.player.is_jumping {
        let step = state.score.record_landing(state.tuning.jumps_per_speed_step);
        state.events.push(GameEvent::Landed {
            score: state.score.score,
        });

        if step {
            state.camera.speed_up(&state.tuning);
            state.events.push(GameEvent::SpeedUp {
                speed: state.camera.speed,
            });
            log::info!(
                "Difficulty up after {} jumps: camera speed {:.1}",
                state.score.successful_jumps,
                state.camera.speed
            );
        }
    }
    state.player.is_jumping = false;
}

fn fall_off_screen(state: &mut GameState) {
    state.fell_off_screen = true;
    state.player.moving = false;

    if !state.game_over_announced {
        state.game_over_announced = true;
        state.events.push(GameEvent::GameOver {
            score: state.score.score,
        });
        log::info!(
            "Game over: score {}, {} jumps, height {:.0}",
            state.score.score,
            state.score.successful_jumps,
            state.max_height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayerMode;
    use crate::tuning::Tuning;

    const JUMP: TickInput = TickInput {
        move_left: false,
        move_right: false,
        jump: true,
    };

    fn started_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        tick(&mut state, &JUMP);
        state.drain_events();
        state
    }

    #[test]
    fn test_waiting_until_first_jump() {
        let mut state = GameState::new(12345, Tuning::default());
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.started);
        assert_eq!(state.camera.scroll_y, 0.0);
        assert_eq!(state.player.pos.y, 75.0);
    }

    #[test]
    fn test_start_then_jump() {
        let mut state = GameState::new(12345, Tuning::default());

        tick(&mut state, &JUMP);
        assert!(state.started);
        assert_eq!(state.player.pos.y, 75.0);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(!state.player.is_jumping);

        tick(&mut state, &JUMP);
        assert_eq!(state.player.vel_y, 15.0);
        assert!(state.player.is_jumping);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_landing_back_on_ground_slab_scores() {
        let mut state = started_state(1);
        tick(&mut state, &JUMP);
        assert!(state.player.is_jumping);

        // Ride the jump out with no input
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
            if !state.player.is_jumping {
                break;
            }
        }
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.score.score, 1);
        assert_eq!(state.score.successful_jumps, 1);
    }

    #[test]
    fn test_fall_is_terminal_and_announced_once() {
        let mut state = started_state(3);
        let mut game_overs = 0;
        for _ in 0..400 {
            tick(&mut state, &TickInput::default());
            game_overs += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }
        assert!(state.fell_off_screen);
        assert_eq!(game_overs, 1);
        assert_eq!(state.player_mode(), PlayerMode::Falling);

        let frozen = state.player.clone();
        let scroll = state.camera.scroll_y;
        tick(&mut state, &JUMP);
        tick(&mut state, &TickInput { move_left: true, ..Default::default() });
        assert_eq!(state.player.pos, frozen.pos);
        assert_eq!(state.player.vel_y, frozen.vel_y);
        assert_eq!(state.camera.scroll_y, scroll);
    }

    #[test]
    fn test_max_height_tracks_peak() {
        let mut state = started_state(9);
        state.platforms.retain(|p| p.is_ground);
        tick(&mut state, &JUMP);

        let mut peak = state.player.pos.y;
        while state.player.is_jumping {
            tick(&mut state, &TickInput::default());
            peak = peak.max(state.player.pos.y);
            assert_eq!(state.max_height, peak);
        }

        assert!(peak > 75.0 + 150.0);
        assert_eq!(state.player.pos.y, 75.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.max_height, peak);
    }

    #[test]
    fn test_camera_scrolls_while_idle() {
        let mut state = started_state(4);
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert!((state.camera.scroll_y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            JUMP,
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.platforms, state2.platforms);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.score, state2.score);
    }
}
