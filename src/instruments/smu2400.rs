//! SCPI-flavoured adapter (2400-class SMU vocabulary)

use crate::params::MemristorParams;
use crate::smu::SimulatedSmu;

/// Simulated 2400-class SMU.
///
/// Same device model as every other adapter; only the method vocabulary
/// follows the SCPI-era driver it stands in for.
#[derive(Debug, Clone)]
pub struct Smu2400 {
    smu: SimulatedSmu,
    event_log: Vec<String>,
}

impl Smu2400 {
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
    pub fn source_voltage(&mut self, volts: f64, icc: f64) {
        self.smu.set_voltage(volts, icc);
    }

    /// Source a current level with a voltage compliance
    pub fn source_current(&mut self, amps: f64, vcc: f64) {
        self.smu.set_current(amps, vcc);
    }

    /// Read the terminal voltage
    pub fn read_voltage(&mut self) -> f64 {
        self.smu.measure_voltage()
    }

    /// Read the terminal current
    pub fn read_current(&mut self) -> f64 {
        self.smu.measure_current()
    }

    /// Turn the output on
    pub fn output_on(&mut self) {
        self.smu.enable_output(true);
        self.event_log.push("OUTP ON".to_string());
    }

    /// Turn the output off
    pub fn output_off(&mut self) {
        self.smu.enable_output(false);
        self.event_log.push("OUTP OFF".to_string());
    }

    /// Front-panel beep; a no-op kept for driver compatibility
    pub fn beep(&mut self, _frequency_hz: f64, _duration_s: f64) {}

    /// Canned identity string
    pub fn get_idn(&self) -> String {
        format!(
            "SIMULATED,MODEL 2400,{},1.0.0",
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
