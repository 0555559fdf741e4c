//! Collaborator interfaces for UI, playback, and host scheduling.
//!
//! The driver reports note transitions and controls live tone playback
//! through these traits instead of ambient global bindings. Batch runs
//! compose with [`Headless`]; an interactive host supplies real
//! implementations at construction time.

/// Receives progress updates on every note transition.
pub trait ProgressSink {
    /// Called at each note transition, and once more on completion with the
    /// done sentinels `(total_ms, total_ms, 0, rest = true, 0.0)`.
    fn progress(&mut self, elapsed_ms: u64, total_ms: u64, note: u8, rest: bool, freq_hz: f64);
}

/// Receives the selected note whenever the circuit state changes, for
/// visualization frontends.
pub trait CircuitMonitor {
    fn note_changed(&mut self, note: u8, rest: bool);
}

/// Controls a live tone generator on the host.
///
/// All operations must be idempotent: stopping an already-silent player or
/// retuning to the current frequency are harmless.
pub trait TonePlayer {
    /// Prepare the host audio context. Called once before the run phase.
    fn init(&mut self) {}

    /// Start or retune a continuous tone at `freq_hz`.
    fn play(&mut self, freq_hz: f64);

    /// Stop the tone if one is sounding.
    fn stop(&mut self);
}

/// Cooperative scheduling point between simulation steps.
///
/// Called after each note-transition burst so an embedding host can process
/// pending UI/audio work. Must not affect simulation state.
pub trait Scheduler {
    fn yield_now(&mut self);
}

/// No-op implementation of every collaborator trait, for batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl ProgressSink for Headless {
    fn progress(&mut self, _elapsed_ms: u64, _total_ms: u64, _note: u8, _rest: bool, _freq_hz: f64) {
    }
}

impl CircuitMonitor for Headless {
    fn note_changed(&mut self, _note: u8, _rest: bool) {}
}

impl TonePlayer for Headless {
    fn play(&mut self, _freq_hz: f64) {}

    fn stop(&mut self) {}
}

impl Scheduler for Headless {
    fn yield_now(&mut self) {}
}
