//! Capability validation suites.
//!
//! - `platform_info`: every platform in the runtime's registry
//! - `device_info`: the single device under test
//!
//! Both walk a checklist from [`crate::data::checklist`] through
//! [`classify::classify_instance`].
//!
//! # Failure handling
//!
//! - Neither extension advertised: the instance is excluded (Skip)
//! - Advertised extension without capability data: `Verdict::Fail`
//! - Driver transport error or malformed buffer: `Err`, which the
//!   orchestrator reports as a failed suite

pub mod classify;
pub mod device_info;
pub mod platform_info;

use crate::Verdict;
use classify::InstanceReport;
use serde::Serialize;

/// Outcome of one validator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRun {
    pub verdict: Verdict,
    /// Number of instances the runtime reported.
    pub instance_count: usize,
    /// Instances excluded because neither extension is advertised.
    pub skipped: usize,
    /// Instances classified before the run ended, in order.
    pub instances: Vec<InstanceReport>,
}
