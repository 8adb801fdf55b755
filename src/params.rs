//! Device constants for the simulated memristive element

use thiserror::Error;

/// Errors produced when validating a parameter set
#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("ron must be positive, got {0}")]
    NonPositiveRon(f64),

    #[error("roff must be positive, got {0}")]
    NonPositiveRoff(f64),

    #[error("roff ({roff}) must exceed ron ({ron})")]
    InvertedResistanceWindow { ron: f64, roff: f64 },

    #[error("{name} must be non-negative, got {value}")]
    NegativeCoefficient { name: &'static str, value: f64 },
}

/// Physical constants of one simulated memristive device.
///
/// Created once at device construction and treated as immutable afterwards.
/// Resistances are in ohms, thresholds in volts, drift rates in state-units
/// per volt-second above threshold, the relaxation rate in 1/s, and the
/// noise fields are standard deviations of additive Gaussian read noise.
///
/// # Example
///
/// ```ignore
/// let params = MemristorParams::default()
///     .with_resistance_window(150.0, 1.5e6)
///     .with_set(0.9, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemristorParams {
    /// Low-resistance-state resistance (state = 1)
    pub ron: f64,
    /// High-resistance-state resistance (state = 0)
    pub roff: f64,
    /// Positive voltage magnitude above which SET drift begins
    pub set_threshold: f64,
    /// Voltage magnitude (compared against negative bias) above which RESET drift begins
    pub reset_threshold: f64,
    /// SET drift rate coefficient
    pub set_rate: f64,
    /// RESET drift rate coefficient
    pub reset_rate: f64,
    /// First-order relaxation rate toward the neutral state
    pub relax_rate: f64,
    /// Std dev of current read noise (A)
    pub noise_current: f64,
    /// Std dev of voltage read noise (V)
    pub noise_voltage: f64,
}

impl Default for MemristorParams {
    fn default() -> Self {
        Self {
            ron: 100.0,
            roff: 1e6,
            set_threshold: 0.8,
            reset_threshold: 0.8,
            set_rate: 1.0,
            reset_rate: 1.0,
            relax_rate: 0.05,
            noise_current: 1e-9,
            noise_voltage: 1e-6,
        }
    }
}

impl MemristorParams {
    /// Set the resistance window `[ron, roff]`
    pub fn with_resistance_window(mut self, ron: f64, roff: f64) -> Self {
        self.ron = ron;
        self.roff = roff;
        self
    }

    /// Set the SET threshold voltage and drift rate
    pub fn with_set(mut self, threshold: f64, rate: f64) -> Self {
        self.set_threshold = threshold;
        self.set_rate = rate;
        self
    }

    /// Set the RESET threshold voltage and drift rate
    pub fn with_reset(mut self, threshold: f64, rate: f64) -> Self {
        self.reset_threshold = threshold;
        self.reset_rate = rate;
        self
    }

    /// Set the relaxation rate toward the neutral state
    pub fn with_relax_rate(mut self, rate: f64) -> Self {
        self.relax_rate = rate;
        self
    }

    /// Set the read-noise standard deviations
    pub fn with_noise(mut self, noise_current: f64, noise_voltage: f64) -> Self {
        self.noise_current = noise_current;
        self.noise_voltage = noise_voltage;
        self
    }

    /// Validate the parameter set, returning it unchanged on success.
    ///
    /// Validation is offered at construction sites; the simulation
    /// operations themselves never reject a parameter set (they clamp
    /// instead, so a running measurement script cannot be broken by a
    /// sloppy constant).
    pub fn validated(self) -> Result<Self, ParamsError> {
        if !(self.ron > 0.0) {
            return Err(ParamsError::NonPositiveRon(self.ron));
        }
        if !(self.roff > 0.0) {
            return Err(ParamsError::NonPositiveRoff(self.roff));
        }
        if self.roff <= self.ron {
            return Err(ParamsError::InvertedResistanceWindow {
                ron: self.ron,
                roff: self.roff,
            });
        }
        for (name, value) in [
            ("set_threshold", self.set_threshold),
            ("reset_threshold", self.reset_threshold),
            ("set_rate", self.set_rate),
            ("reset_rate", self.reset_rate),
            ("relax_rate", self.relax_rate),
            ("noise_current", self.noise_current),
            ("noise_voltage", self.noise_voltage),
        ] {
            if !(value >= 0.0) {
                return Err(ParamsError::NegativeCoefficient { name, value });
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(MemristorParams::default().validated().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_ron() {
        let params = MemristorParams::default().with_resistance_window(0.0, 1e6);
        assert_eq!(
            params.validated().unwrap_err(),
            ParamsError::NonPositiveRon(0.0)
        );
    }

    #[test]
    fn test_rejects_inverted_window() {
        let params = MemristorParams::default().with_resistance_window(1e6, 100.0);
        assert!(matches!(
            params.validated().unwrap_err(),
            ParamsError::InvertedResistanceWindow { .. }
        ));
    }

    #[test]
    fn test_rejects_negative_rates() {
        let params = MemristorParams::default().with_set(0.8, -1.0);
        assert!(matches!(
            params.validated().unwrap_err(),
            ParamsError::NegativeCoefficient {
                name: "set_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let params = MemristorParams::default().with_reset(f64::NAN, 1.0);
        assert!(params.validated().is_err());
    }

    #[test]
    fn test_builders_chain() {
        let params = MemristorParams::default()
            .with_resistance_window(150.0, 1.5e6)
            .with_set(0.9, 2.0)
            .with_noise(1e-6, 1e-4);
        assert_eq!(params.ron, 150.0);
        assert_eq!(params.set_threshold, 0.9);
        assert_eq!(params.noise_voltage, 1e-4);
    }
}
