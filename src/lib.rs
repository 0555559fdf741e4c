//! # Chiptone Core
//!
//! A cycle-accurate cosimulator for a note-sequencer chip and the analog
//! output stage around it.
//!
//! The digital device (an opaque clocked sequencer, see [`device::LogicDevice`])
//! selects one of eight notes per step. On the board, that selection runs
//! through a 3-to-8 address decoder into a bank of PNP switches, each of
//! which grounds one timing resistor of a 555 timer wired in astable mode.
//! The timer's square wave is the audible output.
//!
//! This library is organized into several modules:
//!
//! - [`device`] - the digital device boundary and a ROM-backed demo sequencer
//! - [`components`] - closed-form models of the analog output stage
//! - [`sim`] - the cosimulation driver and its configuration
//! - [`hooks`] - injected UI/playback collaborator interfaces
//! - [`audio`] - WAV serialization of the rendered samples
//! - [`error`] - the unified error type
//!
//! ## Usage
//!
//! ```no_run
//! use chiptone_core::{Driver, RomSequencer, SimConfig};
//!
//! let device = RomSequencer::new(RomSequencer::demo_score(), 20_000_000);
//! let driver = Driver::new(device, SimConfig::default())?;
//! let report = driver.run_to_wav("music.wav")?;
//! println!("rendered {} samples", report.samples.len());
//! # Ok::<(), chiptone_core::ChiptoneError>(())
//! ```
//!
//! ## Simulation method
//!
//! The driver toggles a virtual clock and lets the device evaluate on every
//! edge. On rising edges only, it resolves the decoder/switch/resistor chain,
//! detects note transitions (resetting the timer's phase so each note starts
//! clean), and renders one 16-bit sample whenever the cycle counter crosses
//! the next sample boundary. Digital cycles, analog phase, and sample time
//! all derive from the same cycle counter, so the three timelines cannot
//! drift apart.

pub mod audio;
pub mod components;
pub mod device;
pub mod error;
pub mod hooks;
pub mod sim;

// Re-export main types for convenience
pub use device::{LogicDevice, RomSequencer, ScoreStep};
pub use error::{ChiptoneError, Result};
pub use sim::{Driver, RunReport, SimConfig};

/// Solfège names for the eight note lines.
pub const NOTE_NAMES: [&str; 8] = ["Do", "Re", "Mi", "Fa", "Sol", "La", "Si", "Do'"];
