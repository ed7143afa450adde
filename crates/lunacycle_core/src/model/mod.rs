//! Domain model for cycle tracking.
//!
//! # Responsibility
//! - Define immutable value snapshots consumed by the inference engine.
//! - Keep wire naming stable for serialized profiles and predictions.
//!
//! # Invariants
//! - Engine functions receive these types by reference and never mutate them.
//! - Calendar dates are `chrono::NaiveDate` with whole-day arithmetic.

pub mod daily_log;
pub mod period;
pub mod phase;
pub mod prediction;
pub mod profile;
