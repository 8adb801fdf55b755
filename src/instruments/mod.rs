//! Thin per-instrument adapters over the one simulation core
//!
//! The real lab drives the same device model through instruments with
//! different command vocabularies. Each adapter here wraps a
//! [`SimulatedSmu`](crate::smu::SimulatedSmu) and exposes one instrument's
//! method names, plus the diagnostic stubs (identity string, error queue,
//! event log) that let calling code avoid special-casing "is this the
//! simulator or real hardware". The stubs return canned values, always
//! succeed, and never fail.

mod smu2400;
mod smu2450;
mod smu4200;

pub use smu2400::Smu2400;
pub use smu2450::Smu2450Tsp;
pub use smu4200::Smu4200;
