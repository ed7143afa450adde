//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the persistence collaborator contracts the service layer consumes.
//! - Isolate SQLite query details from orchestration and engine code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`) in
//!   addition to DB transport errors.

pub mod daily_log_repo;
pub mod period_repo;
