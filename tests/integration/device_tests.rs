//! Device validator tests.

use crate::mocks::*;
use interop_preflight::checks::classify::{ContractViolation, InstanceOutcome};
use interop_preflight::checks::device_info::validate_device;
use interop_preflight::platform::{EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION};
use interop_preflight::Verdict;

#[test]
fn test_fully_populated_device_passes() {
    let device = MockSource::interop_device();

    let run = validate_device(0, &device).unwrap();
    assert!(run.verdict.is_pass());
    assert_eq!(run.instance_count, 1);
    assert_eq!(run.skipped, 0);

    let codes: Vec<_> = run.instances[0]
        .entries
        .iter()
        .map(|e| e.handle_types.clone())
        .collect();
    assert_eq!(
        codes,
        vec![
            vec![SEMAPHORE_OPAQUE_FD],
            vec![SEMAPHORE_SYNC_FD, SEMAPHORE_OPAQUE_FD],
            vec![MEMORY_OPAQUE_FD, MEMORY_DMA_BUF],
        ]
    );
    assert_eq!(
        device.queried(),
        vec![DEVICE_SEMAPHORE_IMPORT, DEVICE_SEMAPHORE_EXPORT, DEVICE_MEMORY_IMPORT]
    );
}

#[test]
fn test_device_without_extensions_skips() {
    let device = MockSource::no_extensions();

    let run = validate_device(2, &device).unwrap();
    assert!(run.verdict.is_skipped());
    assert_eq!(run.skipped, 1);
    assert_eq!(run.instances[0].index, 2);
    assert!(device.queried().is_empty());
}

#[test]
fn test_device_memory_violation() {
    let device = MockSource::new("gpu")
        .with_extensions(&[EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION])
        .reporting(DEVICE_SEMAPHORE_EXPORT, &[SEMAPHORE_SYNC_FD]);

    let run = validate_device(0, &device).unwrap();
    assert_eq!(
        run.verdict,
        Verdict::Fail {
            message: ContractViolation::MemoryImportNotReported.to_string()
        }
    );
}

#[test]
fn test_device_semaphore_violation() {
    let device = MockSource::new("gpu")
        .with_extensions(&[EXTERNAL_SEMAPHORE_EXTENSION])
        .reporting(DEVICE_MEMORY_IMPORT, &[MEMORY_OPAQUE_FD]);

    let run = validate_device(0, &device).unwrap();
    assert_eq!(
        run.instances[0].outcome,
        InstanceOutcome::Fail(ContractViolation::NoSemaphoreHandleTypes)
    );
}

#[test]
fn test_unknown_codes_are_accepted() {
    let device = MockSource::new("gpu")
        .with_extensions(&[EXTERNAL_MEMORY_EXTENSION])
        .reporting(DEVICE_MEMORY_IMPORT, &[0xdead_beef]);

    let run = validate_device(0, &device).unwrap();
    assert!(run.verdict.is_pass());
    assert_eq!(run.instances[0].entries[2].handle_types, vec![0xdead_beef]);
}
