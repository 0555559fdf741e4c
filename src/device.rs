//! The digital device boundary.
//!
//! The sequencer chip itself is an opaque clocked logic block: the driver
//! only ever touches its clock/reset/play inputs, asks it to re-evaluate,
//! and observes its outputs. [`LogicDevice`] captures exactly that surface,
//! so the driver can run against a Verilator-style handle, a software model,
//! or a test fixture interchangeably.

/// Outputs observable on the device after an [`eval`](LogicDevice::eval).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceOutputs {
    /// Current position in the note sequence. Note transitions are detected
    /// on this output, so a note repeated at two consecutive positions still
    /// retriggers.
    pub address: u32,
    /// Note index driving the decoder. Valid range is 0-7; the decoder masks
    /// anything wider.
    pub note: u8,
    /// High while the current step is a rest (no tone).
    pub rest: bool,
    /// High once the sequence has been fully played.
    pub end: bool,
}

/// A clocked digital device under cosimulation.
///
/// The driver sets inputs, calls [`eval`](LogicDevice::eval) after every
/// input change, and reads [`outputs`](LogicDevice::outputs). The device is
/// expected to react to rising clock edges only.
pub trait LogicDevice {
    /// Drive the clock input.
    fn set_clock(&mut self, level: bool);

    /// Drive the active-low reset input.
    fn set_reset_n(&mut self, released: bool);

    /// Drive the play-enable input.
    fn set_play(&mut self, play: bool);

    /// Re-evaluate the device logic against the current inputs.
    fn eval(&mut self);

    /// Observe the device outputs.
    fn outputs(&self) -> DeviceOutputs;
}

/// One step of a [`RomSequencer`] score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreStep {
    /// Note index (0-7).
    pub note: u8,
    /// Play silence for this step instead of a note.
    pub rest: bool,
}

impl ScoreStep {
    /// A sounding note.
    pub fn note(note: u8) -> Self {
        Self { note, rest: false }
    }

    /// A rest.
    pub fn rest() -> Self {
        Self { note: 0, rest: true }
    }
}

/// A minimal ROM-backed sequencer implementing [`LogicDevice`].
///
/// Stands in for the real sequencer chip: a fixed score in ROM, an address
/// counter that advances every `cycles_per_step` rising clock edges while
/// reset is released and play is asserted, and an end flag once the last
/// step has elapsed. Reset is synchronous and returns the device to step 0.
#[derive(Debug, Clone)]
pub struct RomSequencer {
    score: Vec<ScoreStep>,
    cycles_per_step: u64,

    clk: bool,
    prev_clk: bool,
    reset_n: bool,
    play: bool,

    address: u32,
    cycles_in_step: u64,
    end: bool,
}

impl RomSequencer {
    /// Create a sequencer over `score`, holding each step for
    /// `cycles_per_step` rising clock edges.
    ///
    /// The score must be non-empty and the step length non-zero; both are
    /// programming errors in the composition layer, not runtime conditions.
    pub fn new(score: Vec<ScoreStep>, cycles_per_step: u64) -> Self {
        assert!(!score.is_empty(), "score must contain at least one step");
        assert!(cycles_per_step > 0, "cycles_per_step must be non-zero");
        Self {
            score,
            cycles_per_step,
            clk: false,
            prev_clk: false,
            reset_n: false,
            play: false,
            address: 0,
            cycles_in_step: 0,
            end: false,
        }
    }

    /// An eight-note ascending scale, the demo score for the CLI binary.
    pub fn demo_score() -> Vec<ScoreStep> {
        (0..8).map(ScoreStep::note).collect()
    }
}

impl LogicDevice for RomSequencer {
    fn set_clock(&mut self, level: bool) {
        self.clk = level;
    }

    fn set_reset_n(&mut self, released: bool) {
        self.reset_n = released;
    }

    fn set_play(&mut self, play: bool) {
        self.play = play;
    }

    fn eval(&mut self) {
        let rising = self.clk && !self.prev_clk;
        self.prev_clk = self.clk;

        if !rising {
            return;
        }

        if !self.reset_n {
            self.address = 0;
            self.cycles_in_step = 0;
            self.end = false;
            return;
        }

        if !self.play || self.end {
            return;
        }

        self.cycles_in_step += 1;
        if self.cycles_in_step >= self.cycles_per_step {
            self.cycles_in_step = 0;
            if (self.address as usize) + 1 < self.score.len() {
                self.address += 1;
            } else {
                self.end = true;
            }
        }
    }

    fn outputs(&self) -> DeviceOutputs {
        let step = self.score[self.address as usize];
        DeviceOutputs {
            address: self.address,
            note: step.note,
            rest: step.rest,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_once(dev: &mut RomSequencer) {
        dev.set_clock(true);
        dev.eval();
        dev.set_clock(false);
        dev.eval();
    }

    fn released(score: Vec<ScoreStep>, cycles_per_step: u64) -> RomSequencer {
        let mut dev = RomSequencer::new(score, cycles_per_step);
        dev.set_reset_n(true);
        dev.set_play(true);
        dev
    }

    #[test]
    fn test_holds_address_while_reset_asserted() {
        let mut dev = RomSequencer::new(RomSequencer::demo_score(), 2);
        dev.set_play(true);
        for _ in 0..10 {
            clock_once(&mut dev);
        }
        assert_eq!(dev.outputs().address, 0);
        assert!(!dev.outputs().end);
    }

    #[test]
    fn test_advances_every_cycles_per_step() {
        let mut dev = released(RomSequencer::demo_score(), 3);
        for expected in 0..8u32 {
            assert_eq!(dev.outputs().address, expected);
            assert_eq!(dev.outputs().note, expected as u8);
            for _ in 0..3 {
                clock_once(&mut dev);
            }
        }
    }

    #[test]
    fn test_end_flag_after_last_step() {
        let mut dev = released(vec![ScoreStep::note(0), ScoreStep::note(1)], 2);
        for _ in 0..4 {
            clock_once(&mut dev);
        }
        let out = dev.outputs();
        assert!(out.end);
        // Address parks on the final step
        assert_eq!(out.address, 1);
    }

    #[test]
    fn test_rest_step_outputs() {
        let mut dev = released(vec![ScoreStep::rest(), ScoreStep::note(4)], 1);
        assert!(dev.outputs().rest);
        clock_once(&mut dev);
        let out = dev.outputs();
        assert!(!out.rest);
        assert_eq!(out.note, 4);
    }

    #[test]
    fn test_ignores_falling_edges() {
        let mut dev = released(RomSequencer::demo_score(), 1);
        // Only input wiggles, no rising edge
        dev.set_clock(false);
        dev.eval();
        dev.eval();
        assert_eq!(dev.outputs().address, 0);
    }
}
