//! Virtual simulation clock
//!
//! The simulated device does not sleep: pulse widths and wait periods are
//! modeled by advancing this clock, never by blocking the caller. All
//! state-evolution timesteps derive from differences of `now()`.

/// Monotonic virtual clock owned by one simulated device.
///
/// Time only moves when `advance` is called, so two back-to-back
/// measurements with no intervening advance observe zero elapsed device
/// time and are therefore deterministic.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// Create a clock at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in seconds
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// Negative or non-finite increments are ignored; the clock is
    /// monotonically non-decreasing.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        assert_eq!(SimClock::new().now(), 0.0);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(1.5);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn test_clock_ignores_negative_and_nan() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.advance(-0.5);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.now(), 1.0);
    }
}
