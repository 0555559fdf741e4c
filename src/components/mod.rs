//! Component models for the analog output stage.
//!
//! This module provides closed-form models for the discrete components that
//! surround the sequencer chip on the board:
//! - [`AddressDecoder`] - 3-to-8 line decoder (74HC138-style, active-low)
//! - [`SwitchArray`] - PNP transistor switch bank driven by the decoder
//! - [`ResistorBank`] - one timing resistor per note
//! - [`AstableTimer`] - 555 timer in free-running astable mode
//!
//! Each model is evaluated once per rising clock edge from its upstream
//! neighbour's output; only the timer carries state across cycles.

mod decoder;
mod resistors;
mod switches;
mod timer;

pub use decoder::AddressDecoder;
pub use resistors::ResistorBank;
pub use switches::SwitchArray;
pub use timer::AstableTimer;

/// Number of note lines in the output stage. Fixed by the board layout:
/// one decoder output, one switch, and one resistor per note.
pub const NOTE_LINES: usize = 8;
