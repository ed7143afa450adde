//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository snapshots, the forecaster and the engine into
//!   use-case level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod cycle_service;
pub mod prediction_service;
