//! Timing resistor bank, one resistor per note.

use crate::error::{ChiptoneError, Result};

use super::NOTE_LINES;

/// A bank of eight fixed timing resistors.
///
/// Each resistor sets the 555 timer's total timing resistance for one note.
/// The values are derived once at construction from the target note
/// frequencies and the timing capacitance using the astable relation
/// `R = 1.4 / (f * C)`, and are immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResistorBank {
    values: [f64; NOTE_LINES],
}

impl ResistorBank {
    /// Build the bank from eight note frequencies and the timing capacitance.
    ///
    /// Fails if any frequency or the capacitance is not strictly positive:
    /// a non-positive value would put a zero or negative denominator in the
    /// timer's frequency formula at runtime.
    pub fn from_frequencies(freqs: &[f64; NOTE_LINES], capacitance: f64) -> Result<Self> {
        if capacitance <= 0.0 {
            return Err(ChiptoneError::component(
                "resistor bank",
                format!("capacitance must be positive, got {}", capacitance),
            ));
        }

        let mut values = [0.0; NOTE_LINES];
        for (i, (r, &freq)) in values.iter_mut().zip(freqs.iter()).enumerate() {
            if freq <= 0.0 {
                return Err(ChiptoneError::component(
                    "resistor bank",
                    format!("note {} frequency must be positive, got {}", i, freq),
                ));
            }
            *r = 1.4 / (freq * capacitance);
        }

        Ok(Self { values })
    }

    /// Resistance of note line `i`.
    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Resolve the closed switches to a single selected resistance.
    ///
    /// Scans in index order and returns the first closed line's resistance.
    /// With no switch closed (only reachable if the decoder invariant is
    /// violated upstream) the bank falls back to line 0's resistance; this is
    /// defined behavior inherited from the board, not a failure.
    pub fn select(&self, closed: &[bool; NOTE_LINES]) -> f64 {
        for (r, &sw) in self.values.iter().zip(closed.iter()) {
            if sw {
                return *r;
            }
        }
        self.values[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FREQS: [f64; 8] = [262.0, 294.0, 330.0, 349.0, 392.0, 440.0, 494.0, 523.0];

    #[test]
    fn test_values_follow_astable_relation() {
        let bank = ResistorBank::from_frequencies(&FREQS, 100e-9).unwrap();
        for i in 0..8 {
            assert_relative_eq!(bank.value(i), 1.4 / (FREQS[i] * 100e-9), max_relative = 1e-12);
        }
        // C4 at 262 Hz with 100nF lands around 53.4k
        assert_relative_eq!(bank.value(0), 53435.0, max_relative = 1e-4);
    }

    #[test]
    fn test_select_returns_closed_line() {
        let bank = ResistorBank::from_frequencies(&FREQS, 100e-9).unwrap();
        for i in 0..8 {
            let mut closed = [false; 8];
            closed[i] = true;
            assert_eq!(bank.select(&closed), bank.value(i));
        }
    }

    #[test]
    fn test_select_falls_back_to_line_zero() {
        let bank = ResistorBank::from_frequencies(&FREQS, 100e-9).unwrap();
        assert_eq!(bank.select(&[false; 8]), bank.value(0));
    }

    #[test]
    fn test_first_closed_line_wins() {
        let bank = ResistorBank::from_frequencies(&FREQS, 100e-9).unwrap();
        let mut closed = [false; 8];
        closed[2] = true;
        closed[5] = true;
        assert_eq!(bank.select(&closed), bank.value(2));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(ResistorBank::from_frequencies(&FREQS, 0.0).is_err());
        assert!(ResistorBank::from_frequencies(&FREQS, -1e-9).is_err());

        let mut bad = FREQS;
        bad[3] = 0.0;
        assert!(ResistorBank::from_frequencies(&bad, 100e-9).is_err());
    }
}
