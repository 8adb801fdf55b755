//! memsmu - Hardware-free memristive device simulator
//!
//! A simulated two-terminal memristive element behind a source-measure-unit
//! (SMU) style control surface, used as a drop-in stand-in for lab
//! instruments when no hardware is attached.
//!
//! # Architecture
//!
//! - One scalar device state `w` in [0, 1] (0 = HRS, 1 = LRS), advanced by
//!   explicit forward-Euler steps through three regimes: SET drift above
//!   the positive threshold, RESET drift below the negative threshold, and
//!   first-order relaxation toward a neutral state otherwise.
//! - A virtual clock: pulse widths and wait periods advance simulated time
//!   in ~1 ms substeps instead of sleeping, so scripted measurements run at
//!   CPU speed.
//! - Measurements are compliance-limited first, then read noise from a
//!   per-device seeded generator is added on top.
//! - One simulation core, thin per-instrument adapters
//!   ([`instruments`]) exposing each instrument's method vocabulary.
//!
//! Everything is synchronous and single-threaded: no operation blocks, and
//! a facade shared across threads must be serialized by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use memsmu::prelude::*;
//!
//! let params = MemristorParams::default()
//!     .with_resistance_window(150.0, 1.5e6)
//!     .with_set(0.9, 2.0);
//! let mut smu = SimulatedSmu::with_seed("SIM::0", params, Some(42));
//!
//! smu.set_voltage(2.0, 0.1);
//! smu.advance_time(1.0, true);          // one second of drift, no sleep
//! let current = smu.measure_current();
//!
//! let outcome = smu.run_sweep(&SweepConfig::default());
//! println!("{}: {} points", outcome.status, outcome.voltages.len());
//! ```

pub mod clock;
pub mod device;
pub mod instruments;
pub mod noise;
pub mod params;
pub mod smu;
pub mod sweep;
pub mod trace;

pub use device::{MemristorModel, SourceMode};
pub use params::{MemristorParams, ParamsError};
pub use smu::SimulatedSmu;
pub use sweep::{SweepConfig, SweepOutcome, SweepStatus};
pub use trace::Trace;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::SimClock;
    pub use crate::device::{MemristorModel, SourceMode};
    pub use crate::instruments::{Smu2400, Smu2450Tsp, Smu4200};
    pub use crate::noise::GaussianNoise;
    pub use crate::params::{MemristorParams, ParamsError};
    pub use crate::smu::SimulatedSmu;
    pub use crate::sweep::{SweepConfig, SweepOutcome, SweepStatus};
    pub use crate::trace::Trace;
}
