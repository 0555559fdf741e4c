//! The cosimulation engine.
//!
//! This module owns the clock-driven loop that keeps three timelines
//! consistent:
//! - digital simulation time (device clock cycles),
//! - analog component state (the 555 timer's phase),
//! - audio sample time (the fixed output sample rate).
//!
//! [`SimConfig`] carries the timing constants and is validated up front;
//! [`Driver`] runs the loop and produces a [`RunReport`] with the rendered
//! sample buffer and the observed note transitions.

mod config;
mod driver;

pub use config::{
    SimConfig, DEFAULT_CAPACITANCE, DEFAULT_CLOCK_HZ, DEFAULT_DURATION_MS, DEFAULT_NOTE_FREQS,
    DEFAULT_R1_RATIO, DEFAULT_SAMPLE_RATE,
};
pub use driver::{Driver, NoteTransition, RunReport};

/// Peak sample value for the rendered square wave, roughly 30% of full
/// scale so the output has headroom without being quiet.
pub const OUTPUT_AMPLITUDE: i16 = 9830;

/// Number of clock toggles issued while reset is held asserted. Even, so
/// the clock is back low when reset is released.
pub const RESET_TOGGLES: usize = 10;
