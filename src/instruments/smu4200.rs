//! LPT/KXCI-flavoured adapter (4200-class parameter analyzer vocabulary)

use crate::params::MemristorParams;
use crate::smu::SimulatedSmu;

/// Simulated 4200-class SMU channel with LPT-style method names.
#[derive(Debug, Clone)]
pub struct Smu4200 {
    smu: SimulatedSmu,
    event_log: Vec<String>,
}

impl Smu4200 {
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

    /// Force a voltage with a current compliance
    pub fn force_voltage(&mut self, volts: f64, icc: f64) {
        self.smu.set_voltage(volts, icc);
    }

    /// Force a current with a voltage compliance
    pub fn force_current(&mut self, amps: f64, vcc: f64) {
        self.smu.set_current(amps, vcc);
    }

    /// Measure current through the channel
    pub fn measure_i(&mut self) -> f64 {
        self.smu.measure_current()
    }

    /// Measure voltage across the channel
    pub fn measure_v(&mut self) -> f64 {
        self.smu.measure_voltage()
    }

    /// Apply one pulse and return the spot reading `(voltage, current)`
    pub fn pulse_output(&mut self, volts: f64, width: f64, icc: f64) -> (f64, f64) {
        self.smu.pulse_with_measurement(volts, width, icc)
    }

    /// Remove all forced stimulus and disable the channel
    pub fn devint(&mut self) {
        self.smu.set_voltage(0.0, f64::MAX);
        self.smu.enable_output(false);
        self.event_log.push("devint".to_string());
    }

    /// Canned identity string
    pub fn get_idn(&self) -> String {
        format!(
            "SIMULATED,MODEL 4200A,{},1.0.0",
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
