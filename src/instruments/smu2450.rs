//! TSP-flavoured adapter (2450-class SMU vocabulary)
//!
//! Carries the script-style method names of the TSP driver, including the
//! positional forming-sweep entry point measurement scripts call.

use crate::params::MemristorParams;
use crate::smu::SimulatedSmu;
use crate::sweep::{SweepConfig, SweepOutcome};

/// Simulated 2450-class SMU with TSP-style method names.
#[derive(Debug, Clone)]
pub struct Smu2450Tsp {
    smu: SimulatedSmu,
    event_log: Vec<String>,
}

impl Smu2450Tsp {
    /// Create a simulated instrument at the given resource address
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_seed(address, MemristorParams::default(), None)
    }

    /// Create with explicit device constants and an optional noise seed
    pub fn with_seed(
        address: impl Into<String>,
        params: MemristorParams,
        seed: Option<u64>,
    ) -> Self {
        Self {
            smu: SimulatedSmu::with_seed(address, params, seed),
            event_log: Vec::new(),
        }
    }

    /// Borrow the underlying facade
    pub fn smu(&self) -> &SimulatedSmu {
        &self.smu
    }

    /// Mutably borrow the underlying facade
    pub fn smu_mut(&mut self) -> &mut SimulatedSmu {
        &mut self.smu
    }

    /// Source a voltage level with a current compliance
    pub fn set_voltage(&mut self, volts: f64, icc: f64) {
        self.smu.set_voltage(volts, icc);
    }

    /// Source a current level with a voltage compliance
    pub fn set_current(&mut self, amps: f64, vcc: f64) {
        self.smu.set_current(amps, vcc);
    }

    /// Measure the terminal voltage
    pub fn measure_voltage(&mut self) -> f64 {
        self.smu.measure_voltage()
    }

    /// Measure the terminal current
    pub fn measure_current(&mut self) -> f64 {
        self.smu.measure_current()
    }

    /// Enable or disable the output
    pub fn enable_output(&mut self, enable: bool) {
        self.smu.enable_output(enable);
        self.event_log
            .push(format!("smu.source.output = {}", if enable { "ON" } else { "OFF" }));
    }

    /// Apply one rectangular voltage pulse
    pub fn voltage_pulse(&mut self, volts: f64, width: f64, icc: f64) {
        self.smu.voltage_pulse(volts, width, icc);
    }

    /// Apply a train of identical pulses with bias-free inter-pulse delays
    pub fn pulse_train(&mut self, volts: f64, width: f64, count: usize, delay_s: f64, icc: f64) {
        self.smu.pulse_train(volts, width, count, delay_s, icc);
    }

    /// Pulse and measure at the end of the hold; returns `(voltage, current)`
    pub fn pulse_with_measurement(&mut self, volts: f64, width: f64, icc: f64) -> (f64, f64) {
        self.smu.pulse_with_measurement(volts, width, icc)
    }

    /// Simulate `duration` seconds of device time without sleeping
    pub fn advance_time(&mut self, duration: f64, with_bias: bool) {
        self.smu.advance_time(duration, with_bias);
    }

    /// Run a forming sweep with adaptive compliance escalation.
    ///
    /// Positional form kept for the measurement scripts; the arguments map
    /// one-to-one onto [`SweepConfig`]. `burn_abort_a = None` selects the
    /// default damage threshold of `max(10 * icc_start, icc_start + eps)`.
    #[allow(clippy::too_many_arguments)]
    pub fn run_tsp_sweep(
        &mut self,
        start_v: f64,
        stop_v: f64,
        step_v: f64,
        icc_start: f64,
        icc_factor: f64,
        icc_max: f64,
        delay_s: f64,
        burn_abort_a: Option<f64>,
    ) -> SweepOutcome {
        let config = SweepConfig {
            start_v,
            stop_v,
            step_v,
            icc_start,
            icc_factor,
            icc_max,
            delay_s,
            abort_current: burn_abort_a,
        };
        let outcome = self.smu.run_sweep(&config);
        self.event_log
            .push(format!("sweep finished: {}", outcome.status));
        outcome
    }

    /// Canned identity string
    pub fn get_idn(&self) -> String {
        format!(
            "SIMULATED,MODEL 2450,{},1.0.0",
            self.smu.address()
        )
    }

    /// Instrument error queue; the simulator's is always empty
    pub fn check_errors(&self) -> Vec<String> {
        Vec::new()
    }

    /// Informational event log accumulated by this adapter
    pub fn get_event_log(&self) -> &[String] {
        &self.event_log
    }

    /// Clear the event log
    pub fn clear_event_log(&mut self) {
        self.event_log.clear();
    }
}
