//! SMU-style control surface over one simulated device
//!
//! This is the facade measurement-pattern code talks to: source, measure,
//! output control, pulses, and sweeps. Every operation is a synchronous
//! function call that runs to completion; pulse widths and delays advance
//! the device's virtual clock instead of sleeping, so wall-clock elapsed
//! time never matches simulated elapsed time. One facade owns one device
//! and provides no locking; multi-threaded callers must serialize access
//! externally.

use tracing::debug;

use crate::device::{MemristorModel, SourceMode};
use crate::params::MemristorParams;
use crate::sweep::{SweepConfig, SweepOutcome};

/// Simulated source-measure unit driving one memristive element.
///
/// # Example
///
/// ```ignore
/// let mut smu = SimulatedSmu::new("SIM::0");
/// smu.set_voltage(2.0, 1e-3);
/// smu.advance_time(0.5, true);
/// let current = smu.measure_current();
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedSmu {
    address: String,
    model: MemristorModel,
}

impl SimulatedSmu {
    /// Create a simulator with default device constants.
    ///
    /// `address` is a cosmetic resource label carried for log messages and
    /// identity strings only.
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_params(address, MemristorParams::default())
    }

    /// Create a simulator with explicit device constants
    pub fn with_params(address: impl Into<String>, params: MemristorParams) -> Self {
        Self::with_seed(address, params, None)
    }

    /// Create a simulator with explicit constants and a noise seed.
    ///
    /// Seeded instances produce bit-identical measurement sequences, which
    /// is what test runs should use.
    pub fn with_seed(
        address: impl Into<String>,
        params: MemristorParams,
        seed: Option<u64>,
    ) -> Self {
        Self {
            address: address.into(),
            model: MemristorModel::new(params, seed),
        }
    }

    /// Resource label given at construction
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Current virtual time in seconds
    pub fn time(&self) -> f64 {
        self.model.time()
    }

    /// Borrow the underlying device model
    pub fn model(&self) -> &MemristorModel {
        &self.model
    }

    /// Mutably borrow the underlying device model (test setup hooks)
    pub fn model_mut(&mut self) -> &mut MemristorModel {
        &mut self.model
    }

    /// Normalized device state in [0, 1]
    pub fn state(&self) -> f64 {
        self.model.state()
    }

    /// Force the device state directly, clamped to [0, 1]
    pub fn set_state(&mut self, w: f64) {
        self.model.set_state(w);
    }

    /// Present device resistance (ohms)
    pub fn resistance(&self) -> f64 {
        self.model.resistance()
    }

    /// Present device conductance (siemens)
    pub fn conductance(&self) -> f64 {
        self.model.conductance()
    }

    /// Source a voltage with a current compliance; output auto-enables
    pub fn set_voltage(&mut self, volts: f64, icc: f64) {
        self.model.set_voltage(volts, icc);
    }

    /// Source a current with a voltage compliance; output auto-enables
    pub fn set_current(&mut self, amps: f64, vcc: f64) {
        self.model.set_current(amps, vcc);
    }

    /// Enable or disable the output; disabling zeroes the source level
    pub fn enable_output(&mut self, enable: bool) {
        self.model.enable_output(enable);
    }

    /// Whether the output is enabled
    pub fn output_enabled(&self) -> bool {
        self.model.output_enabled()
    }

    /// Present source mode
    pub fn source_mode(&self) -> SourceMode {
        self.model.source_mode()
    }

    /// Measure the terminal voltage (catches state up to now first)
    pub fn measure_voltage(&mut self) -> f64 {
        self.model.measure_voltage()
    }

    /// Measure the terminal current (catches state up to now first)
    pub fn measure_current(&mut self) -> f64 {
        self.model.measure_current()
    }

    /// Simulate the passage of `duration` seconds of device time.
    ///
    /// With `with_bias = true` the device keeps evolving under its present
    /// source settings; with `false` it evolves as if the output were off
    /// (a bias-removed wait), restoring the source settings afterwards.
    /// Performs bounded CPU work proportional to `duration / 1 ms` instead
    /// of sleeping.
    pub fn advance_time(&mut self, duration: f64, with_bias: bool) {
        self.model.advance(duration, with_bias);
    }

    /// Apply one rectangular voltage pulse.
    ///
    /// Enables the output, drives `volts` for `width` seconds of simulated
    /// time, then returns to 0 V and disables the output. Callers that
    /// need the output to stay enabled afterwards must re-enable it.
    pub fn voltage_pulse(&mut self, volts: f64, width: f64, icc: f64) {
        debug!(volts, width, icc, "voltage pulse");
        self.enable_output(true);
        self.set_voltage(volts, icc);
        self.advance_time(width, true);
        self.set_voltage(0.0, icc);
        self.enable_output(false);
    }

    /// Apply `count` identical pulses separated by bias-free delays.
    ///
    /// Each inter-pulse delay is modeled with the output off, so the
    /// device relaxes between pulses. The output is disabled at the end.
    pub fn pulse_train(&mut self, volts: f64, width: f64, count: usize, delay_s: f64, icc: f64) {
        debug!(volts, width, count, delay_s, "pulse train");
        for _ in 0..count {
            self.set_voltage(volts, icc);
            self.advance_time(width, true);
            self.set_voltage(0.0, icc);
            self.advance_time(delay_s, false);
        }
        self.enable_output(false);
    }

    /// Apply one pulse and measure at the end of the hold.
    ///
    /// Returns `(voltage, current)` read just before the bias returns to
    /// zero, then leaves the device output-disabled like
    /// [`voltage_pulse`](Self::voltage_pulse).
    pub fn pulse_with_measurement(&mut self, volts: f64, width: f64, icc: f64) -> (f64, f64) {
        self.enable_output(true);
        self.set_voltage(volts, icc);
        self.advance_time(width, true);
        let v = self.measure_voltage();
        let i = self.measure_current();
        self.set_voltage(0.0, icc);
        self.enable_output(false);
        (v, i)
    }

    /// Run a forming sweep; see [`SweepConfig::run`]
    pub fn run_sweep(&mut self, config: &SweepConfig) -> SweepOutcome {
        config.run(self)
    }
}
