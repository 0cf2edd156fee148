//! Device-scope validation.

use crate::checks::classify::{classify_instance, InstanceOutcome};
use crate::checks::ValidationRun;
use crate::data::checklist::DEVICE_CHECKLIST;
use crate::error::Result;
use crate::platform::{CapabilitySource, Scope, EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION};
use crate::Verdict;

/// Validate interop capability reporting on the device under test.
///
/// `index` only labels the device in diagnostics.
pub fn validate_device<S: CapabilitySource + ?Sized>(index: usize, device: &S) -> Result<ValidationRun> {
    let report = classify_instance(Scope::Device, index, device, &DEVICE_CHECKLIST)?;

    let (verdict, skipped) = match report.outcome {
        InstanceOutcome::Excluded => (
            Verdict::Skipped {
                reason: format!(
                    "Device does not support '{}' and '{}'",
                    EXTERNAL_SEMAPHORE_EXTENSION, EXTERNAL_MEMORY_EXTENSION
                ),
            },
            1,
        ),
        InstanceOutcome::Fail(violation) => (
            Verdict::Fail {
                message: violation.to_string(),
            },
            0,
        ),
        InstanceOutcome::Pass => {
            let reported = report.entries.iter().filter(|e| e.supported()).count();
            (
                Verdict::Pass {
                    message: format!(
                        "{} of {} attributes report handle types",
                        reported,
                        DEVICE_CHECKLIST.len()
                    ),
                },
                0,
            )
        }
    };

    Ok(ValidationRun {
        verdict,
        instance_count: 1,
        skipped,
        instances: vec![report],
    })
}
