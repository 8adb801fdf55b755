//! Memristive device model: state, forward-Euler evolution, measurement
//!
//! The device carries one normalized state variable `w` in [0, 1]
//! (0 = fully HRS, 1 = fully LRS). Bias above the SET threshold drifts `w`
//! toward 1, bias below the negative RESET threshold drifts it toward 0,
//! and anything else lets the device relax toward a neutral state. Each
//! catch-up applies a single explicit forward-Euler step over the virtual
//! time elapsed since the previous one.

use tracing::debug;

use crate::clock::SimClock;
use crate::noise::GaussianNoise;
use crate::params::MemristorParams;

/// Neutral state the device relaxes toward when unbiased
pub const RELAX_TARGET: f64 = 0.3;

/// Initial state at construction (slightly conductive)
pub const INITIAL_STATE: f64 = 0.05;

/// Simulated time per evolution substep used by [`MemristorModel::advance`]
pub const SUBSTEP_S: f64 = 1e-3;

/// Conductance ceiling returned if resistance ever degenerates
const CONDUCTANCE_CEILING: f64 = 1e6;

/// Source quantity the device is being driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceMode {
    /// Forcing voltage, measuring current
    Voltage,
    /// Forcing current, measuring voltage
    Current,
}

/// One simulated two-terminal memristive element.
///
/// Holds the device constants, the scalar state, the source bookkeeping,
/// the virtual clock, and the per-device noise generators. Single-threaded
/// by design: there is no internal locking, and callers driving one model
/// from several threads must serialize access externally.
#[derive(Debug, Clone)]
pub struct MemristorModel {
    params: MemristorParams,
    clock: SimClock,
    state_w: f64,
    output_enabled: bool,
    source_mode: SourceMode,
    source_level: f64,
    current_limit: f64,
    voltage_limit: f64,
    last_update: f64,
    noise_i: GaussianNoise,
    noise_v: GaussianNoise,
}

impl MemristorModel {
    /// Create a model with the given constants and optional RNG seed.
    ///
    /// When a seed is supplied the two noise channels derive distinct
    /// sub-seeds from it, so seeded runs are fully reproducible.
    pub fn new(params: MemristorParams, seed: Option<u64>) -> Self {
        let (seed_i, seed_v) = match seed {
            Some(s) => (Some(s), Some(s.wrapping_add(1))),
            None => (None, None),
        };
        Self {
            noise_i: GaussianNoise::new(params.noise_current, seed_i),
            noise_v: GaussianNoise::new(params.noise_voltage, seed_v),
            params,
            clock: SimClock::new(),
            state_w: INITIAL_STATE,
            output_enabled: false,
            source_mode: SourceMode::Voltage,
            source_level: 0.0,
            current_limit: f64::MAX,
            voltage_limit: f64::MAX,
            last_update: 0.0,
        }
    }

    /// Device constants
    pub fn params(&self) -> &MemristorParams {
        &self.params
    }

    /// Current virtual time in seconds
    pub fn time(&self) -> f64 {
        self.clock.now()
    }

    /// Current normalized state in [0, 1]
    pub fn state(&self) -> f64 {
        self.state_w
    }

    /// Set the state directly, clamped to [0, 1] (use with caution)
    pub fn set_state(&mut self, w: f64) {
        self.state_w = if w.is_finite() { w.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Whether the source output is enabled
    pub fn output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Present source mode
    pub fn source_mode(&self) -> SourceMode {
        self.source_mode
    }

    /// Present commanded source level (V or A depending on mode)
    pub fn source_level(&self) -> f64 {
        self.source_level
    }

    /// Present current compliance magnitude (A)
    pub fn current_limit(&self) -> f64 {
        self.current_limit
    }

    /// Present voltage compliance magnitude (V)
    pub fn voltage_limit(&self) -> f64 {
        self.voltage_limit
    }

    /// Command a voltage source level with a current compliance.
    ///
    /// Catches the state up first, then switches mode. Output is enabled
    /// as a side effect, matching SMU autoranging behavior. Non-finite
    /// inputs are coerced (level to 0, compliance to unlimited).
    pub fn set_voltage(&mut self, volts: f64, current_limit: f64) {
        self.catch_up();
        self.source_mode = SourceMode::Voltage;
        self.source_level = if volts.is_finite() { volts } else { 0.0 };
        self.current_limit = sanitize_limit(current_limit);
        self.output_enabled = true;
    }

    /// Command a current source level with a voltage compliance.
    pub fn set_current(&mut self, amps: f64, voltage_limit: f64) {
        self.catch_up();
        self.source_mode = SourceMode::Current;
        self.source_level = if amps.is_finite() { amps } else { 0.0 };
        self.voltage_limit = sanitize_limit(voltage_limit);
        self.output_enabled = true;
    }

    /// Enable or disable the source output.
    ///
    /// Disabling also zeroes the source level, so a disabled device reads
    /// no forced stimulus.
    pub fn enable_output(&mut self, enable: bool) {
        self.catch_up();
        self.output_enabled = enable;
        if !enable {
            self.source_level = 0.0;
        }
    }

    /// Resistance derived from the present state: a decreasing affine map
    /// from `w = 0` (roff) to `w = 1` (ron). Always in `[ron, roff]`.
    pub fn resistance(&self) -> f64 {
        let w = self.state_w.clamp(0.0, 1.0);
        w * self.params.ron + (1.0 - w) * self.params.roff
    }

    /// Conductance `1/R`, with a defensive ceiling if `R <= 0`
    pub fn conductance(&self) -> f64 {
        let r = self.resistance();
        if r <= 0.0 {
            CONDUCTANCE_CEILING
        } else {
            1.0 / r
        }
    }

    /// Measure the terminal voltage.
    ///
    /// Catches the state up first. In voltage mode the commanded level is
    /// returned exactly (the source is assumed ideal). In current mode the
    /// voltage is back-derived through the present resistance, read noise
    /// is added, and the result is clamped to the voltage compliance.
    pub fn measure_voltage(&mut self) -> f64 {
        self.catch_up();
        match self.source_mode {
            SourceMode::Voltage => self.source_level,
            SourceMode::Current => {
                let v = self.source_level * self.resistance() + self.noise_v.sample();
                clamp_magnitude(v, self.voltage_limit)
            }
        }
    }

    /// Measure the terminal current.
    ///
    /// Catches the state up first. In current mode the commanded level is
    /// returned exactly. In voltage mode Ohm's law gives the true current,
    /// compliance clamps it (sign preserved), and read noise is added
    /// after the clamp so it represents instrument noise on top of the
    /// limited value.
    pub fn measure_current(&mut self) -> f64 {
        self.catch_up();
        match self.source_mode {
            SourceMode::Current => self.source_level,
            SourceMode::Voltage => {
                let mut i = self.source_level * self.conductance();
                if i.abs() > self.current_limit {
                    debug!(
                        current = i,
                        limit = self.current_limit,
                        "current compliance clamp"
                    );
                    i = clamp_magnitude(i, self.current_limit);
                }
                i + self.noise_i.sample()
            }
        }
    }

    /// Advance the device through `duration` seconds of simulated time.
    ///
    /// The duration is split into ~1 ms substeps (at least one) and the
    /// state is caught up after each, so long waits accumulate the same
    /// drift or relaxation they would under real elapsed time, without any
    /// real sleeping. With `with_bias = false` the device evolves as if
    /// the output were disabled for the duration (a bias-removed wait);
    /// the source settings are restored afterwards. Non-positive or
    /// non-finite durations are a no-op.
    pub fn advance(&mut self, duration: f64, with_bias: bool) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let n = (duration / SUBSTEP_S).ceil().max(1.0) as usize;
        let step = duration / n as f64;

        let saved_enabled = self.output_enabled;
        if !with_bias {
            self.output_enabled = false;
        }
        for _ in 0..n {
            self.clock.advance(step);
            self.catch_up();
        }
        if !with_bias {
            self.output_enabled = saved_enabled;
        }
    }

    /// Advance `state_w` to reflect the virtual time elapsed since the
    /// previous catch-up, under the presently commanded stimulus.
    ///
    /// One forward-Euler step per call. Sub-threshold bias and disabled
    /// output both relax toward [`RELAX_TARGET`]; bias at or beyond a
    /// threshold drifts linearly in the overdrive. In current mode the
    /// drive voltage is back-derived from the resistance at the pre-step
    /// state (fixed evaluation order). The state is clamped to [0, 1]
    /// after every update.
    pub fn catch_up(&mut self) {
        let now = self.clock.now();
        let dt = (now - self.last_update).max(0.0);
        if dt == 0.0 {
            return;
        }
        self.last_update = now;

        if !self.output_enabled {
            self.relax(dt);
            return;
        }

        let voltage = match self.source_mode {
            SourceMode::Voltage => self.source_level,
            SourceMode::Current => self.source_level * self.resistance(),
        };

        if voltage >= self.params.set_threshold {
            let dw = self.params.set_rate * (voltage - self.params.set_threshold) * dt;
            self.state_w = (self.state_w + dw).clamp(0.0, 1.0);
        } else if voltage <= -self.params.reset_threshold {
            let dw = self.params.reset_rate * (voltage.abs() - self.params.reset_threshold) * dt;
            self.state_w = (self.state_w - dw).clamp(0.0, 1.0);
        } else {
            self.relax(dt);
        }
    }

    fn relax(&mut self, dt: f64) {
        let dw = (RELAX_TARGET - self.state_w) * self.params.relax_rate * dt;
        self.state_w = (self.state_w + dw).clamp(0.0, 1.0);
    }
}

fn sanitize_limit(limit: f64) -> f64 {
    if limit.is_finite() && limit != 0.0 {
        limit.abs()
    } else {
        f64::MAX
    }
}

fn clamp_magnitude(value: f64, limit: f64) -> f64 {
    value.clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quiet_params() -> MemristorParams {
        MemristorParams::default().with_noise(0.0, 0.0)
    }

    #[test]
    fn test_resistance_affine_endpoints() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(0.0);
        assert_relative_eq!(model.resistance(), model.params().roff);
        model.set_state(1.0);
        assert_relative_eq!(model.resistance(), model.params().ron);
        model.set_state(0.5);
        let mid = 0.5 * (model.params().ron + model.params().roff);
        assert_relative_eq!(model.resistance(), mid);
    }

    #[test]
    fn test_set_drift_moves_toward_lrs() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        let before = model.state();
        model.set_voltage(2.0, 0.1);
        model.advance(0.1, true);
        assert!(model.state() > before);
    }

    #[test]
    fn test_reset_drift_moves_toward_hrs() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(0.9);
        model.set_voltage(-2.0, 0.1);
        model.advance(0.1, true);
        assert!(model.state() < 0.9);
    }

    #[test]
    fn test_subthreshold_bias_relaxes() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(0.9);
        // 0.5 V is below the 0.8 V SET threshold
        model.set_voltage(0.5, 0.1);
        model.advance(10.0, true);
        assert!(model.state() < 0.9);
        assert!(model.state() > RELAX_TARGET);
    }

    #[test]
    fn test_relaxation_fixed_point() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(RELAX_TARGET);
        for _ in 0..5 {
            model.advance(1.0, false);
            assert_relative_eq!(model.state(), RELAX_TARGET);
        }
    }

    #[test]
    fn test_state_clamped_under_strong_drive() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_voltage(10.0, 1.0);
        model.advance(100.0, true);
        assert_eq!(model.state(), 1.0);
        model.set_voltage(-10.0, 1.0);
        model.advance(100.0, true);
        assert_eq!(model.state(), 0.0);
    }

    #[test]
    fn test_no_time_no_change() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_voltage(2.0, 0.1);
        let w = model.state();
        // repeated measurements without advancing the clock
        for _ in 0..10 {
            model.measure_current();
        }
        assert_eq!(model.state(), w);
    }

    #[test]
    fn test_disable_output_zeroes_level() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_voltage(1.5, 0.1);
        model.enable_output(false);
        assert!(!model.output_enabled());
        assert_eq!(model.source_level(), 0.0);
    }

    #[test]
    fn test_voltage_mode_measure_voltage_is_exact() {
        let params = MemristorParams::default().with_noise(1e-3, 1e-3);
        let mut model = MemristorModel::new(params, Some(9));
        model.set_voltage(1.25, 0.1);
        assert_eq!(model.measure_voltage(), 1.25);
    }

    #[test]
    fn test_current_mode_measure_current_is_exact() {
        let params = MemristorParams::default().with_noise(1e-3, 1e-3);
        let mut model = MemristorModel::new(params, Some(9));
        model.set_current(1e-4, 10.0);
        assert_eq!(model.measure_current(), 1e-4);
    }

    #[test]
    fn test_current_compliance_clamp_preserves_sign() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(1.0); // near ron = 100 ohm
        model.set_voltage(-1.0, 1e-4);
        let i = model.measure_current();
        assert_relative_eq!(i, -1e-4);
    }

    #[test]
    fn test_zero_compliance_means_unlimited() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(1.0);
        model.set_voltage(1.0, 0.0);
        let i = model.measure_current();
        assert_relative_eq!(i, 1.0 / model.params().ron, epsilon = 1e-9);
    }

    #[test]
    fn test_current_mode_voltage_back_derivation() {
        let mut model = MemristorModel::new(quiet_params(), Some(1));
        model.set_state(1.0);
        model.set_current(1e-3, 100.0);
        let v = model.measure_voltage();
        assert_relative_eq!(v, 1e-3 * model.params().ron, epsilon = 1e-9);
    }

    #[test]
    fn test_seeded_models_reproduce() {
        let params = MemristorParams::default().with_noise(1e-6, 1e-6);
        let mut a = MemristorModel::new(params.clone(), Some(42));
        let mut b = MemristorModel::new(params, Some(42));
        a.set_voltage(0.1, 1e-3);
        b.set_voltage(0.1, 1e-3);
        for _ in 0..10 {
            assert_eq!(a.measure_current(), b.measure_current());
        }
    }
}
