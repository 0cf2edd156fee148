//! Platform-scope validation.
//!
//! Enumerates every platform and classifies each one with the platform
//! checklist. The scan stops at the first platform that violates the
//! contract.

use crate::checks::classify::{classify_instance, InstanceOutcome};
use crate::checks::ValidationRun;
use crate::data::checklist::PLATFORM_CHECKLIST;
use crate::error::Result;
use crate::platform::{InteropRuntime, Scope, EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION};
use crate::Verdict;
use tracing::info;

/// Validate interop capability reporting on every platform.
pub fn validate_platforms<R: InteropRuntime + ?Sized>(runtime: &R) -> Result<ValidationRun> {
    let platforms = runtime.platforms()?;
    let instance_count = platforms.len();
    info!("{} platforms available", instance_count);

    let mut run = ValidationRun {
        verdict: Verdict::Pass {
            message: String::new(),
        },
        instance_count,
        skipped: 0,
        instances: Vec::with_capacity(instance_count),
    };

    for (index, platform) in platforms.iter().enumerate() {
        let report = classify_instance(Scope::Platform, index, platform, &PLATFORM_CHECKLIST)?;
        let outcome = report.outcome;
        run.instances.push(report);

        match outcome {
            InstanceOutcome::Excluded => run.skipped += 1,
            InstanceOutcome::Pass => {}
            InstanceOutcome::Fail(violation) => {
                run.verdict = Verdict::Fail {
                    message: format!("Platform {}: {}", index, violation),
                };
                return Ok(run);
            }
        }
    }

    run.verdict = if run.skipped == instance_count {
        Verdict::Skipped {
            reason: format!(
                "{} of {} platforms support neither '{}' nor '{}'",
                run.skipped, instance_count, EXTERNAL_SEMAPHORE_EXTENSION, EXTERNAL_MEMORY_EXTENSION
            ),
        }
    } else {
        Verdict::Pass {
            message: format!(
                "{} of {} platforms report interop handle types ({} skipped)",
                instance_count - run.skipped,
                instance_count,
                run.skipped
            ),
        }
    };

    Ok(run)
}
