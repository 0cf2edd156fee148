//! interop-preflight library
//!
//! Conformance checks for OpenCL interop capability reporting.
//!
//! A driver that advertises `cl_khr_external_memory` or
//! `cl_khr_external_semaphore` must back it with non-empty handle-type
//! lists. This library checks that contract at two scopes:
//! - `platform_info`: every platform in the registry
//! - `device_info`: one device under test
//!
//! Queries go through the [`platform::InteropRuntime`] trait, implemented
//! by a fixture-backed simulated driver and, with the `opencl` feature, by
//! the system's OpenCL runtime.
//!
//! # Example
//!
//! ```no_run
//! use interop_preflight::{run_preflight, PreflightConfig};
//!
//! let config = PreflightConfig {
//!     fixture: Some("driver.toml".into()),
//!     ..Default::default()
//! };
//! let report = run_preflight(&config).expect("Validation failed");
//! println!("Suites passed: {}", report.summary().passed);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod platform;
pub mod version;

use engine::orchestrator::{OrchestratorConfig, SuiteOrchestrator};
use engine::result::ValidationReport;
use platform::fixture::FixtureRuntime;
use platform::InteropRuntime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// Re-exports for public API
pub use engine::result::{ResultSummary, SuiteReport};
pub use error::PreflightError;

/// Verdict of one suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Every included instance reports consistent capabilities
    Pass { message: String },
    /// A contract violation or a fatal driver error
    Fail { message: String },
    /// Every instance was excluded; the suite skipped itself
    Skipped { reason: String },
}

impl Verdict {
    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Verdict::Skipped { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass { message } => write!(f, "PASS: {}", message),
            Verdict::Fail { message } => write!(f, "FAIL: {}", message),
            Verdict::Skipped { reason } => write!(f, "SKIP: {}", reason),
        }
    }
}

/// A validation suite.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Suite {
    /// Platform-scope handle-type reporting
    #[value(name = "platform_info")]
    PlatformInfo,
    /// Device-scope handle-type reporting
    #[value(name = "device_info")]
    DeviceInfo,
}

impl Suite {
    pub const ALL: [Suite; 2] = [Suite::PlatformInfo, Suite::DeviceInfo];

    pub fn name(&self) -> &'static str {
        match self {
            Suite::PlatformInfo => "platform_info",
            Suite::DeviceInfo => "device_info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Suite::PlatformInfo => "External memory and semaphore handle types on every platform",
            Suite::DeviceInfo => "External memory and semaphore handle types on the device under test",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for running validation suites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflightConfig {
    /// Suites to run (empty = all)
    pub suites: Vec<Suite>,
    /// Suites to leave out
    pub skip: Vec<Suite>,
    /// Device under test for the device suite
    pub device_index: usize,
    /// Stop after the first failed suite
    pub fail_fast: bool,
    /// Simulated driver to run against instead of the system runtime
    pub fixture: Option<PathBuf>,
}

impl PreflightConfig {
    /// Suites to run, in execution order
    pub fn selected_suites(&self) -> Vec<Suite> {
        Suite::ALL
            .into_iter()
            .filter(|s| self.suites.is_empty() || self.suites.contains(s))
            .filter(|s| !self.skip.contains(s))
            .collect()
    }

    fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            fail_fast: self.fail_fast,
            device_index: self.device_index,
        }
    }
}

/// Run the selected suites against a given runtime.
pub fn run_with_runtime<R: InteropRuntime + ?Sized>(
    runtime: &R,
    backend: &str,
    config: &PreflightConfig,
) -> ValidationReport {
    let orchestrator = SuiteOrchestrator::new(runtime, config.orchestrator_config());
    orchestrator.run_suites(&config.selected_suites(), backend)
}

/// Run validation suites.
///
/// Uses the fixture named in `config` when present, otherwise the system
/// OpenCL runtime (requires the `opencl` feature).
///
/// Contract violations and driver errors inside a suite are reported in
/// the returned report; `Err` means no runtime could be set up.
pub fn run_preflight(config: &PreflightConfig) -> Result<ValidationReport, PreflightError> {
    if let Some(ref path) = config.fixture {
        let runtime = FixtureRuntime::load(path)?;
        let backend = format!("fixture:{}", path.display());
        return Ok(run_with_runtime(&runtime, &backend, config));
    }

    #[cfg(feature = "opencl")]
    let report = {
        let runtime = platform::opencl::OpenClRuntime::new();
        Ok(run_with_runtime(&runtime, "opencl", config))
    };

    #[cfg(not(feature = "opencl"))]
    let report = Err(PreflightError::NoBackend);

    report
}
