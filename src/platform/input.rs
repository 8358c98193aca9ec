//! Input sources
//!
//! The driver polls an `InputSource` once per presented frame. Keys are
//! level-triggered: a held key reads as pressed on every poll.

use std::collections::VecDeque;

use crate::consts::*;
use crate::sim::{GameState, Platform, TickInput, support_height};

/// Discrete key state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Window close or escape
    pub quit: bool,
}

impl InputState {
    pub const JUMP: InputState = InputState {
        move_left: false,
        move_right: false,
        jump: true,
        quit: false,
    };

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Anything that can report key state each frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> InputState;
}

/// Replays a fixed list of frames, then reports nothing held
/// (or a quit request, if asked to)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputState>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_when_done: false,
        }
    }

    /// Press jump once to start the session, then idle
    pub fn start_only() -> Self {
        Self::new([InputState::JUMP])
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> InputState {
        match self.frames.pop_front() {
            Some(frame) => frame,
            None => InputState {
                quit: self.quit_when_done,
                ..Default::default()
            },
        }
    }
}

/// Highest climb a single jump can reach (feet), with a little slack
const JUMP_REACH: f32 = 170.0;
/// Horizontal distance treated as "lined up"
const STEER_DEAD_ZONE: f32 = 4.0;

/// Demo player: picks the lowest platform it can reach above its feet,
/// walks under it, jumps, and steers toward its center while airborne
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target: Option<Platform>,
}

impl Autopilot {
    pub fn target(&self) -> Option<Platform> {
        self.target
    }

    fn pick_target(state: &GameState) -> Option<Platform> {
        let feet = state.player.bottom();
        state
            .platforms
            .iter()
            .filter(|p| p.top() > feet + 1.0 && p.top() <= feet + JUMP_REACH)
            .min_by(|a, b| {
                let da = (a.x + a.width / 2.0 - state.player.pos.x).abs();
                let db = (b.x + b.width / 2.0 - state.player.pos.x).abs();
                a.top().total_cmp(&b.top()).then(da.total_cmp(&db))
            })
            .copied()
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> InputState {
        if !state.started {
            return InputState::JUMP;
        }
        if state.fell_off_screen {
            return InputState::default();
        }

        let player = &state.player;
        let supported = !player.is_jumping
            && support_height(player, &state.platforms, &state.tuning).is_some();
        if supported {
            self.target = Self::pick_target(state);
        }

        let Some(target) = self.target else {
            // Nothing reachable: hop in place and hope the level catches up
            return InputState::JUMP;
        };

        let center = (target.x + target.width / 2.0).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        let dx = center - player.pos.x;
        let mut input = InputState {
            move_left: dx < -STEER_DEAD_ZONE,
            move_right: dx > STEER_DEAD_ZONE,
            ..Default::default()
        };

        // Jump when the run-up is short enough to cover in the air
        let air_ticks = 2.0 * state.tuning.jump_speed / -state.tuning.gravity;
        input.jump = supported && dx.abs() <= state.tuning.move_speed * air_ticks * 0.8;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_script_then_idle() {
        let state = GameState::new(1, Tuning::default());
        let mut input = ScriptedInput::new([InputState::JUMP, InputState::default()]);
        assert!(input.poll(&state).jump);
        assert!(!input.poll(&state).jump);
        assert_eq!(input.poll(&state), InputState::default());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_script_can_request_quit() {
        let state = GameState::new(1, Tuning::default());
        let mut input = ScriptedInput::new([]).quit_when_done();
        assert!(input.poll(&state).quit);
    }

    #[test]
    fn test_autopilot_starts_and_targets_above() {
        let mut state = GameState::new(21, Tuning::default());
        let mut pilot = Autopilot::default();

        let first = pilot.poll(&state);
        assert!(first.jump);
        tick(&mut state, &first.tick_input());
        assert!(state.started);

        pilot.poll(&state);
        let target = pilot.target().expect("a platform within reach of the ground");
        assert!(target.top() > state.player.bottom());
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = GameState::new(77, Tuning::default());
        let mut pilot = Autopilot::default();
        for _ in 0..600 {
            let input = pilot.poll(&state);
            tick(&mut state, &input.tick_input());
            if state.fell_off_screen {
                break;
            }
        }
        assert!(state.score.score > 0);
    }
}
