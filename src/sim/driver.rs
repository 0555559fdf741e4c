//! The cosimulation driver.

use std::path::Path;

use tracing::{debug, warn};

use crate::audio;
use crate::components::{AddressDecoder, AstableTimer, ResistorBank, SwitchArray};
use crate::device::LogicDevice;
use crate::error::Result;
use crate::hooks::{CircuitMonitor, Headless, ProgressSink, Scheduler, TonePlayer};

use super::config::SimConfig;
use super::{OUTPUT_AMPLITUDE, RESET_TOGGLES};

/// A detected note transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteTransition {
    /// Cycle count at the transition.
    pub cycle: u64,
    /// Note index that was sounding before, if any.
    pub prev_note: Option<u8>,
    /// Note index now selected.
    pub note: u8,
    /// Whether the new step is a rest.
    pub rest: bool,
    /// Timer frequency derived for the new note, in Hz.
    pub freq_hz: f64,
    /// Duration of the previous note in milliseconds (zero at the first
    /// transition).
    pub prev_duration_ms: u64,
}

/// Result of a completed simulation run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rising-edge cycles actually simulated.
    pub cycles: u64,
    /// Simulated time actually covered, in milliseconds.
    pub elapsed_ms: u64,
    /// Rendered 16-bit mono sample stream.
    pub samples: Vec<i16>,
    /// Every note transition observed during the run, in order.
    pub transitions: Vec<NoteTransition>,
}

/// The cosimulation driver.
///
/// Owns the digital device for the lifetime of one run, steps it on a
/// virtual clock, resolves the analog chain on every rising edge, and renders
/// the audio sample stream. UI and playback collaborators are injected;
/// batch runs use the default [`Headless`] hooks.
pub struct Driver<D: LogicDevice> {
    device: D,
    config: SimConfig,

    decoder: AddressDecoder,
    switches: SwitchArray,
    resistors: ResistorBank,
    timer: AstableTimer,

    progress: Box<dyn ProgressSink>,
    monitor: Box<dyn CircuitMonitor>,
    tone: Box<dyn TonePlayer>,
    scheduler: Box<dyn Scheduler>,
}

impl<D: LogicDevice> Driver<D> {
    /// Create a driver for `device` under `config`.
    ///
    /// Validates the configuration and derives the resistor bank up front:
    /// nothing inside the run loop is allowed to fail.
    pub fn new(device: D, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let resistors = ResistorBank::from_frequencies(&config.note_freqs, config.capacitance)?;

        Ok(Self {
            device,
            config,
            decoder: AddressDecoder::new(),
            switches: SwitchArray::new(),
            resistors,
            timer: AstableTimer::new(),
            progress: Box::new(Headless),
            monitor: Box::new(Headless),
            tone: Box::new(Headless),
            scheduler: Box::new(Headless),
        })
    }

    /// Replace the progress collaborator.
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the circuit visualization collaborator.
    pub fn with_monitor(mut self, monitor: Box<dyn CircuitMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Replace the live tone player.
    pub fn with_tone(mut self, tone: Box<dyn TonePlayer>) -> Self {
        self.tone = tone;
        self
    }

    /// Replace the cooperative scheduler.
    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Run the simulation to completion and return the rendered report.
    ///
    /// The run covers the configured cycle budget unless the device asserts
    /// its end flag first. Consumes the driver; the device handle is torn
    /// down when the report is returned.
    pub fn run(mut self) -> Result<RunReport> {
        let cycles_per_ms = self.config.cycles_per_ms();
        let cycles_per_sample = self.config.cycles_per_sample();
        let total_cycles = self.config.total_cycles();
        let total_ms = self.config.duration_ms;
        let dt = self.config.sample_dt();
        let capacitance = self.config.capacitance;
        let r1_ratio = self.config.r1_ratio;

        self.reset_device();
        self.tone.init();

        let mut samples: Vec<i16> =
            Vec::with_capacity((total_ms * self.config.sample_rate as u64 / 1000) as usize);
        let mut transitions = Vec::new();

        let mut clk = false;
        let mut cycle: u64 = 0;
        let mut next_sample: u64 = 0;
        let mut last_addr: Option<u32> = None;
        let mut last_note: Option<u8> = None;
        let mut note_start_cycle: u64 = 0;

        while cycle < total_cycles && !self.device.outputs().end {
            clk = !clk;
            self.device.set_clock(clk);
            self.device.eval();

            // Digital logic is edge-triggered: the analog chain and the
            // sampler only advance on rising edges.
            if !clk {
                continue;
            }
            cycle += 1;

            let out = self.device.outputs();

            // Surrounding circuit: decoder -> switches -> resistors
            let lines = self.decoder.decode(out.note);
            let closed = self.switches.update(&lines);
            let r = self.resistors.select(&closed);
            let r1 = r * r1_ratio;
            let r2 = r * (1.0 - r1_ratio) / 2.0;

            // Note change detection, keyed on the sequence address so a
            // repeated note still retriggers.
            if last_addr != Some(out.address) {
                if out.note > 7 {
                    warn!(
                        note = out.note,
                        "device note index out of range, masked to 3 bits"
                    );
                }

                let prev_duration_ms = if last_addr.is_some() {
                    (cycle - note_start_cycle) / cycles_per_ms
                } else {
                    0
                };

                self.timer.reset();
                let freq_hz = AstableTimer::astable_frequency(r1, r2, capacitance);

                let transition = NoteTransition {
                    cycle,
                    prev_note: last_note,
                    note: out.note,
                    rest: out.rest,
                    freq_hz,
                    prev_duration_ms,
                };
                debug!(
                    ms = cycle / cycles_per_ms,
                    note = out.note,
                    rest = out.rest,
                    freq_hz,
                    prev_duration_ms,
                    "note transition"
                );
                transitions.push(transition);

                self.progress
                    .progress(cycle / cycles_per_ms, total_ms, out.note, out.rest, freq_hz);
                self.monitor.note_changed(out.note, out.rest);
                if out.rest {
                    self.tone.stop();
                } else {
                    self.tone.play(freq_hz);
                }
                self.scheduler.yield_now();

                last_addr = Some(out.address);
                last_note = Some(out.note);
                note_start_cycle = cycle;
            }

            // Audio sampling on the cycle grid
            if cycle >= next_sample {
                let sample = if out.rest {
                    0
                } else if self.timer.step(r1, r2, capacitance, dt) {
                    OUTPUT_AMPLITUDE
                } else {
                    -OUTPUT_AMPLITUDE
                };
                samples.push(sample);
                next_sample += cycles_per_sample;
            }
        }

        self.tone.stop();
        self.progress.progress(total_ms, total_ms, 0, true, 0.0);

        Ok(RunReport {
            cycles: cycle,
            elapsed_ms: cycle / cycles_per_ms,
            samples,
            transitions,
        })
    }

    /// Run the simulation and serialize the rendered samples as a WAV file.
    pub fn run_to_wav<P: AsRef<Path>>(self, path: P) -> Result<RunReport> {
        let sample_rate = self.config.sample_rate;
        let report = self.run()?;
        audio::write_wav(path, &report.samples, sample_rate)?;
        Ok(report)
    }

    /// Hold the device in reset for a fixed even number of clock toggles,
    /// then release reset and enable play.
    fn reset_device(&mut self) {
        self.device.set_clock(false);
        self.device.set_reset_n(false);
        self.device.set_play(false);

        let mut clk = false;
        for _ in 0..RESET_TOGGLES {
            clk = !clk;
            self.device.set_clock(clk);
            self.device.eval();
        }

        self.device.set_reset_n(true);
        self.device.set_play(true);
    }
}
