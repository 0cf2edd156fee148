//! Validation engine module.
//!
//! Provides suite orchestration and result aggregation.

pub mod orchestrator;
pub mod result;
