//! 555 timer in astable (free-running) mode.

/// A 555 timer wired as a free-running astable oscillator.
///
/// The classic two-resistor/one-capacitor configuration: the capacitor
/// charges through `r1 + r2` and discharges through `r2` alone, producing a
/// square-ish output with frequency `1.4 / ((r1 + 2*r2) * c)` and duty cycle
/// `(r1 + r2) / (r1 + 2*r2)`.
///
/// The model is evaluated closed-form once per audio sample rather than
/// integrated: [`step`](AstableTimer::step) overwrites the component values,
/// advances an elapsed-time accumulator, and reports whether the output sits
/// in the high portion of the current period. The accumulator is the only
/// state; [`reset`](AstableTimer::reset) zeroes it so a new note starts with
/// a clean phase.
#[derive(Debug, Clone)]
pub struct AstableTimer {
    r1: f64,
    r2: f64,
    c: f64,
    /// Elapsed oscillation time since the last reset, in seconds.
    elapsed: f64,
}

impl Default for AstableTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AstableTimer {
    /// Create a timer with nominal 10k/10k/100nF values and zero phase.
    pub fn new() -> Self {
        Self {
            r1: 10_000.0,
            r2: 10_000.0,
            c: 100e-9,
            elapsed: 0.0,
        }
    }

    /// Oscillation frequency in Hz for the current component values.
    pub fn frequency(&self) -> f64 {
        Self::astable_frequency(self.r1, self.r2, self.c)
    }

    /// Fraction of each period spent high. In (0.5, 1.0) for positive legs.
    pub fn duty_cycle(&self) -> f64 {
        (self.r1 + self.r2) / (self.r1 + 2.0 * self.r2)
    }

    /// Output level at the current phase: high while the elapsed phase within
    /// the period is inside the duty fraction.
    pub fn output_level(&self) -> bool {
        let period = 1.0 / self.frequency();
        let phase = self.elapsed % period;
        phase / period < self.duty_cycle()
    }

    /// Advance the oscillator by `dt` seconds with the given component values
    /// and return the new output level.
    ///
    /// Component values are overwritten on every call; the driver re-derives
    /// them from the selected note resistance each sample.
    pub fn step(&mut self, r1: f64, r2: f64, c: f64, dt: f64) -> bool {
        debug_assert!(
            r1 + 2.0 * r2 > 0.0 && c > 0.0,
            "astable timer requires positive timing components"
        );
        self.r1 = r1;
        self.r2 = r2;
        self.c = c;
        self.elapsed += dt;
        self.output_level()
    }

    /// Zero the phase accumulator. Called at every note boundary so a new
    /// note does not inherit stale timing from the previous one.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Astable frequency for the given component values, without touching
    /// any oscillator state. Used for reporting at note transitions.
    pub fn astable_frequency(r1: f64, r2: f64, c: f64) -> f64 {
        debug_assert!(
            r1 + 2.0 * r2 > 0.0 && c > 0.0,
            "astable timer requires positive timing components"
        );
        1.4 / ((r1 + 2.0 * r2) * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_symmetric_legs_closed_form() {
        // r1 == r2 == R collapses the formulas to f = 1.4/(3RC), duty = 2/3
        let f = AstableTimer::astable_frequency(10_000.0, 10_000.0, 100e-9);
        assert_relative_eq!(f, 1.4 / (3.0 * 10_000.0 * 100e-9), max_relative = 1e-12);
        assert_relative_eq!(f, 466.67, max_relative = 1e-4);

        let timer = AstableTimer::new();
        assert_relative_eq!(timer.duty_cycle(), 2.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reset_then_zero_step_is_idempotent() {
        let mut timer = AstableTimer::new();
        let initial = timer.output_level();

        timer.step(10_000.0, 10_000.0, 100e-9, 1e-3);
        timer.reset();
        let after_reset = timer.step(10_000.0, 10_000.0, 100e-9, 0.0);

        assert_eq!(initial, after_reset);
    }

    #[test]
    fn test_output_follows_duty_cycle() {
        let mut timer = AstableTimer::new();
        let period = 1.0 / timer.frequency();
        let duty = timer.duty_cycle();

        // Just inside the high portion
        timer.reset();
        assert!(timer.step(10_000.0, 10_000.0, 100e-9, period * duty * 0.99));

        // Just past it
        timer.reset();
        assert!(!timer.step(10_000.0, 10_000.0, 100e-9, period * duty * 1.01));

        // Wrapped into the next period's high portion
        timer.reset();
        assert!(timer.step(10_000.0, 10_000.0, 100e-9, period * 1.1));
    }

    #[test]
    fn test_step_overwrites_component_values() {
        let mut timer = AstableTimer::new();
        timer.step(20_000.0, 5_000.0, 100e-9, 0.0);
        assert_relative_eq!(
            timer.frequency(),
            AstableTimer::astable_frequency(20_000.0, 5_000.0, 100e-9),
            max_relative = 1e-12
        );
        assert_relative_eq!(timer.duty_cycle(), 25_000.0 / 30_000.0, max_relative = 1e-12);
    }
}
