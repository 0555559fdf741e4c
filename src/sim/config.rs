//! Simulation configuration.

use crate::components::NOTE_LINES;
use crate::error::{ChiptoneError, Result};

/// Default virtual clock frequency in Hz (50 MHz).
pub const DEFAULT_CLOCK_HZ: u64 = 50_000_000;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default total simulation duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 30_000;

/// Default 555 timing capacitance in farads (100 nF).
pub const DEFAULT_CAPACITANCE: f64 = 100e-9;

/// Default split of the selected note resistance into the timer's first leg.
pub const DEFAULT_R1_RATIO: f64 = 0.1;

/// Default note frequencies in Hz: a C4 major scale, Do through Do'.
pub const DEFAULT_NOTE_FREQS: [f64; NOTE_LINES] =
    [262.0, 294.0, 330.0, 349.0, 392.0, 440.0, 494.0, 523.0];

/// Configuration for one simulation run.
///
/// All timing is derived from these values: the device is clocked at
/// `clock_hz`, samples are emitted every `clock_hz / sample_rate` cycles,
/// and note durations are reported in `clock_hz / 1000` cycle units.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Virtual clock frequency in Hz.
    pub clock_hz: u64,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Total simulation duration in milliseconds (upper bound; the device's
    /// end flag can stop the run earlier).
    pub duration_ms: u64,
    /// 555 timing capacitance in farads.
    pub capacitance: f64,
    /// Fraction of the selected note resistance assigned to the timer's
    /// first leg; the remainder is halved into the second leg.
    pub r1_ratio: f64,
    /// Target frequency per note line, used to derive the resistor bank.
    pub note_freqs: [f64; NOTE_LINES],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_ms: DEFAULT_DURATION_MS,
            capacitance: DEFAULT_CAPACITANCE,
            r1_ratio: DEFAULT_R1_RATIO,
            note_freqs: DEFAULT_NOTE_FREQS,
        }
    }
}

impl SimConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the virtual clock frequency in Hz.
    pub fn with_clock_hz(mut self, clock_hz: u64) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    /// Set the output sample rate in Hz.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the total simulation duration in milliseconds.
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the 555 timing capacitance in farads.
    pub fn with_capacitance(mut self, capacitance: f64) -> Self {
        self.capacitance = capacitance;
        self
    }

    /// Set the resistor-leg split ratio.
    pub fn with_r1_ratio(mut self, r1_ratio: f64) -> Self {
        self.r1_ratio = r1_ratio;
        self
    }

    /// Set the per-note target frequencies.
    pub fn with_note_freqs(mut self, note_freqs: [f64; NOTE_LINES]) -> Self {
        self.note_freqs = note_freqs;
        self
    }

    /// Clock cycles per millisecond.
    pub fn cycles_per_ms(&self) -> u64 {
        self.clock_hz / 1000
    }

    /// Clock cycles between two audio samples.
    pub fn cycles_per_sample(&self) -> u64 {
        self.clock_hz / self.sample_rate as u64
    }

    /// Total cycle budget for the run.
    pub fn total_cycles(&self) -> u64 {
        self.duration_ms * self.cycles_per_ms()
    }

    /// Time step between two audio samples, in seconds.
    pub fn sample_dt(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }

    /// Validate the configuration.
    ///
    /// Every failure here would otherwise surface mid-run as a division by
    /// zero or a non-finite frequency silently corrupting the audio, so the
    /// whole configuration is rejected before the loop starts.
    pub fn validate(&self) -> Result<()> {
        if self.clock_hz < 1000 {
            return Err(ChiptoneError::config(format!(
                "clock frequency must be at least 1 kHz, got {} Hz",
                self.clock_hz
            )));
        }

        if self.sample_rate == 0 {
            return Err(ChiptoneError::config("sample rate must be non-zero"));
        }

        if self.sample_rate as u64 > self.clock_hz {
            return Err(ChiptoneError::config(format!(
                "sample rate {} Hz exceeds the clock frequency {} Hz; \
                 cycles-per-sample would be zero",
                self.sample_rate, self.clock_hz
            )));
        }

        if self.duration_ms == 0 {
            return Err(ChiptoneError::config("duration must be non-zero"));
        }

        if self.capacitance <= 0.0 {
            return Err(ChiptoneError::config(format!(
                "capacitance must be positive, got {}",
                self.capacitance
            )));
        }

        if self.r1_ratio <= 0.0 || self.r1_ratio >= 1.0 {
            return Err(ChiptoneError::config(format!(
                "r1 ratio must be strictly between 0 and 1, got {}",
                self.r1_ratio
            )));
        }

        for (i, &freq) in self.note_freqs.iter().enumerate() {
            if freq <= 0.0 {
                return Err(ChiptoneError::config(format!(
                    "note {} frequency must be positive, got {}",
                    i, freq
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_derived_quantities() {
        let config = SimConfig::default();
        assert_eq!(config.cycles_per_ms(), 50_000);
        assert_eq!(config.cycles_per_sample(), 50_000_000 / 44_100);
        assert_eq!(config.total_cycles(), 30_000 * 50_000);
    }

    #[test]
    fn test_rejects_slow_clock() {
        assert!(SimConfig::new().with_clock_hz(999).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(SimConfig::new().with_sample_rate(0).validate().is_err());
    }

    #[test]
    fn test_rejects_sample_rate_above_clock() {
        let config = SimConfig::new().with_clock_hz(10_000).with_sample_rate(20_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_duration() {
        assert!(SimConfig::new().with_duration_ms(0).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_analog_values() {
        assert!(SimConfig::new().with_capacitance(0.0).validate().is_err());
        assert!(SimConfig::new().with_r1_ratio(0.0).validate().is_err());
        assert!(SimConfig::new().with_r1_ratio(1.0).validate().is_err());

        let mut freqs = DEFAULT_NOTE_FREQS;
        freqs[5] = -440.0;
        assert!(SimConfig::new().with_note_freqs(freqs).validate().is_err());
    }
}
