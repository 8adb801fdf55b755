//! Forming sweep with adaptive compliance escalation
//!
//! A staircase voltage sweep used to electroform a fresh device: step the
//! bias, measure, and raise the current compliance whenever the reading
//! crowds the present limit. The sweep reports its outcome in-band (the
//! calling measurement script always gets the partial trace back, even on
//! damage or misconfiguration) and never panics.

use tracing::{info, warn};

use crate::smu::SimulatedSmu;
use crate::trace::Trace;

/// Current magnitude above which a device counts as formed (A)
pub const FORMING_CURRENT_A: f64 = 5e-4;

/// Fraction of the compliance limit that triggers escalation
const ESCALATION_FRACTION: f64 = 0.9;

/// Terminal classification of a forming sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepStatus {
    /// Completed without the forming current ever being reached
    NoForm,
    /// Completed with at least one reading above [`FORMING_CURRENT_A`]
    Formed,
    /// Aborted early: a reading reached the damage threshold
    Damage,
    /// Rejected configuration; nothing was driven
    Error,
}

impl SweepStatus {
    /// Uppercase label used in result summaries and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepStatus::NoForm => "NO_FORM",
            SweepStatus::Formed => "FORMED",
            SweepStatus::Damage => "DAMAGE",
            SweepStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for SweepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of one forming sweep.
///
/// # Example
///
/// ```ignore
/// let outcome = SweepConfig {
///     stop_v: 4.0,
///     ..SweepConfig::default()
/// }
/// .run(&mut smu);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// First sweep voltage (V)
    pub start_v: f64,
    /// Last sweep voltage (V), included within half a step
    pub stop_v: f64,
    /// Voltage increment per point (V); sign sets the direction, zero is rejected
    pub step_v: f64,
    /// Initial current compliance (A)
    pub icc_start: f64,
    /// Multiplier applied to the compliance on escalation
    pub icc_factor: f64,
    /// Compliance ceiling the escalation never exceeds (A)
    pub icc_max: f64,
    /// Biased settle time before each measurement (s)
    pub delay_s: f64,
    /// Current magnitude that aborts the sweep as damage (A).
    /// `None` selects `max(10 * icc_start, icc_start + 1e-12)`.
    pub abort_current: Option<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_v: 0.0,
            stop_v: 3.0,
            step_v: 0.1,
            icc_start: 1e-5,
            icc_factor: 10.0,
            icc_max: 1e-2,
            delay_s: 0.0,
            abort_current: None,
        }
    }
}

/// Result of a forming sweep: a terminal status plus whatever samples were
/// collected before the sweep ended. The partial trace is always returned,
/// damage and misconfiguration included.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepOutcome {
    /// Terminal classification
    pub status: SweepStatus,
    /// Commanded voltage at each recorded point (V)
    pub voltages: Vec<f64>,
    /// Measured current at each recorded point (A)
    pub currents: Vec<f64>,
    /// Virtual timestamp of each recorded point (s)
    pub times: Vec<f64>,
    /// Human-readable summary of how the sweep ended
    pub message: String,
}

impl SweepConfig {
    /// Effective damage-abort threshold for this configuration
    pub fn abort_threshold(&self) -> f64 {
        self.abort_current
            .unwrap_or_else(|| (10.0 * self.icc_start).max(self.icc_start + 1e-12))
    }

    /// Run the sweep against `smu`.
    ///
    /// Steps the voltage from `start_v` toward `stop_v`, measuring at each
    /// point. A reading above `0.9 x` the present compliance escalates the
    /// compliance by `icc_factor` (capped at `icc_max`) for subsequent
    /// points; a reading at or above the abort threshold terminates with
    /// [`SweepStatus::Damage`]. On every exit path the device is parked at
    /// 0 V with the output disabled.
    pub fn run(&self, smu: &mut SimulatedSmu) -> SweepOutcome {
        if self.step_v == 0.0 || !self.step_v.is_finite() {
            return SweepOutcome {
                status: SweepStatus::Error,
                voltages: Vec::new(),
                currents: Vec::new(),
                times: Vec::new(),
                message: format!("invalid sweep step: {}", self.step_v),
            };
        }

        let abort_threshold = self.abort_threshold();
        let mut icc = self.icc_start.abs().max(f64::MIN_POSITIVE);
        let ascending = self.step_v > 0.0;
        let tol = 0.5 * self.step_v.abs();

        let mut trace = Trace::new();
        let mut status = SweepStatus::NoForm;
        let mut message = String::new();
        let mut peak = 0.0_f64;
        let mut v = self.start_v;

        loop {
            let past_stop = if ascending {
                v > self.stop_v + tol
            } else {
                v < self.stop_v - tol
            };
            if past_stop {
                break;
            }

            smu.set_voltage(v, icc);
            if self.delay_s > 0.0 {
                smu.advance_time(self.delay_s, true);
            }
            let i = smu.measure_current();
            trace.push(smu.time(), v, i);
            peak = peak.max(i.abs());

            if i.abs() >= abort_threshold {
                status = SweepStatus::Damage;
                message = format!(
                    "aborted at {:.3} V: |I| = {:.3e} A >= {:.3e} A",
                    v,
                    i.abs(),
                    abort_threshold
                );
                warn!(voltage = v, current = i, threshold = abort_threshold, "sweep abort");
                break;
            }

            if i.abs() > ESCALATION_FRACTION * icc && icc < self.icc_max {
                let raised = (icc * self.icc_factor).min(self.icc_max);
                info!(from = icc, to = raised, "compliance escalation");
                icc = raised;
            }

            v += self.step_v;
        }

        if status != SweepStatus::Damage {
            if peak > FORMING_CURRENT_A {
                status = SweepStatus::Formed;
                message = format!("formed: peak |I| = {:.3e} A", peak);
            } else {
                message = format!("no forming event: peak |I| = {:.3e} A", peak);
            }
        }

        // park the device regardless of outcome
        smu.set_voltage(0.0, icc);
        smu.enable_output(false);

        let (times, voltages, currents) = trace.into_columns();
        SweepOutcome {
            status,
            voltages,
            currents,
            times,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(SweepStatus::NoForm.as_str(), "NO_FORM");
        assert_eq!(SweepStatus::Formed.as_str(), "FORMED");
        assert_eq!(SweepStatus::Damage.as_str(), "DAMAGE");
        assert_eq!(SweepStatus::Error.as_str(), "ERROR");
        assert_eq!(SweepStatus::Damage.to_string(), "DAMAGE");
    }

    #[test]
    fn test_default_abort_threshold() {
        let cfg = SweepConfig::default();
        assert_eq!(cfg.abort_threshold(), 10.0 * cfg.icc_start);
    }

    #[test]
    fn test_explicit_abort_threshold_wins() {
        let cfg = SweepConfig {
            abort_current: Some(1e-6),
            ..SweepConfig::default()
        };
        assert_eq!(cfg.abort_threshold(), 1e-6);
    }
}
