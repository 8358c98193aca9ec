//! Platform abstraction layer
//!
//! Seams between the simulation and the outside world:
//! - Input sources (keyboard backend, scripted input, autopilot)
//! - Frame timing (fixed-step accumulator, sleep-to-budget pacing)

pub mod input;
pub mod time;

pub use input::{Autopilot, InputSource, InputState, ScriptedInput};
pub use time::{FixedTimestep, FrameClock, FramePacer, SteppedClock};
