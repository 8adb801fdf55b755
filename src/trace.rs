//! Time/voltage/current sample recorder
//!
//! Measurement-pattern code fills one of these; plotting layers only read
//! the column arrays back.

/// Columnar recording of measurement samples.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    times: Vec<f64>,
    voltages: Vec<f64>,
    currents: Vec<f64>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with room for `n` samples
    pub fn with_capacity(n: usize) -> Self {
        Self {
            times: Vec::with_capacity(n),
            voltages: Vec::with_capacity(n),
            currents: Vec::with_capacity(n),
        }
    }

    /// Append one sample
    pub fn push(&mut self, time: f64, voltage: f64, current: f64) {
        self.times.push(time);
        self.voltages.push(voltage);
        self.currents.push(current);
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Discard all samples, keeping allocations
    pub fn clear(&mut self) {
        self.times.clear();
        self.voltages.clear();
        self.currents.clear();
    }

    /// Timestamp column (virtual seconds)
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Voltage column (V)
    pub fn voltages(&self) -> &[f64] {
        &self.voltages
    }

    /// Current column (A)
    pub fn currents(&self) -> &[f64] {
        &self.currents
    }

    /// Most recent sample as `(time, voltage, current)`, if any
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        let n = self.times.len();
        if n == 0 {
            return None;
        }
        Some((self.times[n - 1], self.voltages[n - 1], self.currents[n - 1]))
    }

    /// Consume the trace into its `(times, voltages, currents)` columns
    pub fn into_columns(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.times, self.voltages, self.currents)
    }
}
