//! Cycle inference engine.
//!
//! # Responsibility
//! - Turn period dates, symptom logs and a profile into derived results:
//!   phase, ovulation signal, confidence adjustment, features and alerts.
//!
//! # Invariants
//! - Every function here is synchronous, pure and total over its inputs.
//! - Inputs are borrowed snapshots; nothing is mutated or logged.
//! - "Today" is always an explicit argument, never read from the clock.

pub mod alert;
pub mod confidence;
pub mod features;
pub mod ovulation;
pub mod phase;
pub mod stats;
