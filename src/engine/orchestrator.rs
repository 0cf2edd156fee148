//! Suite execution orchestrator.
//!
//! Runs the selected suites in order against one runtime.
//!
//! # Failure handling
//!
//! - Driver or fixture error inside a suite: the suite is reported as
//!   `Fail` with the error text and the next suite still runs
//! - Missing device index: the device suite fails, the platform suite is
//!   unaffected
//! - `fail_fast`: no further suites run after the first `Fail`

use crate::checks::device_info::validate_device;
use crate::checks::platform_info::validate_platforms;
use crate::checks::ValidationRun;
use crate::engine::result::{SuiteReport, ValidationReport};
use crate::error::{PreflightError, Result};
use crate::platform::InteropRuntime;
use crate::Suite;
use std::time::Instant;
use tracing::{info, warn};

/// Orchestrator configuration
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    pub fail_fast: bool,
    /// Index into the runtime's device list for the device suite
    pub device_index: usize,
}

/// Suite orchestrator
pub struct SuiteOrchestrator<'a, R: InteropRuntime + ?Sized> {
    runtime: &'a R,
    config: OrchestratorConfig,
}

impl<'a, R: InteropRuntime + ?Sized> SuiteOrchestrator<'a, R> {
    /// Create a new orchestrator over a runtime
    pub fn new(runtime: &'a R, config: OrchestratorConfig) -> Self {
        SuiteOrchestrator { runtime, config }
    }

    /// Run every suite
    pub fn run_all(&self, backend: &str) -> ValidationReport {
        self.run_suites(&Suite::ALL, backend)
    }

    /// Run the given suites in order
    pub fn run_suites(&self, suites: &[Suite], backend: &str) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::new(backend);

        for suite in suites {
            let suite_report = self.run_suite(*suite);
            let failed = suite_report.verdict.is_fail();
            report.suites.push(suite_report);

            if failed && self.config.fail_fast {
                info!("fail-fast: not running remaining suites after {}", suite);
                break;
            }
        }

        report.total_duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Run one suite, turning errors into a failed result
    pub fn run_suite(&self, suite: Suite) -> SuiteReport {
        info!("Running {}", suite);
        let start = Instant::now();

        let result = match suite {
            Suite::PlatformInfo => validate_platforms(self.runtime),
            Suite::DeviceInfo => self.run_device_suite(),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(run) => {
                info!("{}: {}", suite, run.verdict);
                SuiteReport::from_run(suite, run, duration_ms)
            }
            Err(e) => {
                warn!("{} aborted: {}", suite, e);
                SuiteReport::from_error(suite, &e, duration_ms)
            }
        }
    }

    fn run_device_suite(&self) -> Result<ValidationRun> {
        let devices = self.runtime.devices()?;
        let index = self.config.device_index;
        let device = devices.get(index).ok_or(PreflightError::DeviceNotFound {
            index,
            available: devices.len(),
        })?;
        validate_device(index, device)
    }
}
