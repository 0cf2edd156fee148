//! Platform validator tests.

use crate::mocks::*;
use interop_preflight::checks::classify::{ContractViolation, InstanceOutcome};
use interop_preflight::checks::platform_info::validate_platforms;
use interop_preflight::{PreflightError, Verdict};

#[test]
fn test_no_extensions_skips_entirely() {
    let platform = MockSource::no_extensions();
    let runtime = MockRuntime::with_platforms(vec![platform.clone()]);

    let run = validate_platforms(&runtime).unwrap();
    assert!(run.verdict.is_skipped());
    assert_eq!(run.skipped, run.instance_count);
    assert_eq!(run.instances[0].outcome, InstanceOutcome::Excluded);
    assert!(platform.queried().is_empty());
}

#[test]
fn test_memory_extension_without_import_types_fails() {
    let runtime = MockRuntime::with_platforms(vec![MockSource::memory_without_import()]);

    let run = validate_platforms(&runtime).unwrap();
    assert_eq!(
        run.verdict,
        Verdict::Fail {
            message: format!("Platform 0: {}", ContractViolation::MemoryImportNotReported)
        }
    );
}

#[test]
fn test_semaphore_extension_without_handle_types_fails() {
    let platform = MockSource::semaphore_without_handle_types();
    let runtime = MockRuntime::with_platforms(vec![platform.clone()]);

    let run = validate_platforms(&runtime).unwrap();
    assert_eq!(
        run.instances[0].outcome,
        InstanceOutcome::Fail(ContractViolation::NoSemaphoreHandleTypes)
    );
    assert!(run.verdict.is_fail());
    assert_eq!(
        platform.queried(),
        vec![
            PLATFORM_MEMORY_IMPORT,
            PLATFORM_SEMAPHORE_EXPORT,
            PLATFORM_SEMAPHORE_IMPORT
        ]
    );
}

#[test]
fn test_empty_memory_tolerated_when_not_advertised() {
    let platform = MockSource::new("semaphore-only")
        .with_extensions(&[interop_preflight::platform::EXTERNAL_SEMAPHORE_EXTENSION])
        .reporting(PLATFORM_SEMAPHORE_IMPORT, &[SEMAPHORE_OPAQUE_FD]);
    let runtime = MockRuntime::with_platforms(vec![platform]);

    let run = validate_platforms(&runtime).unwrap();
    assert!(run.verdict.is_pass());
    assert!(!run.instances[0].entries[0].supported());
}

#[test]
fn test_one_semaphore_direction_is_enough() {
    let runtime = MockRuntime::with_platforms(vec![MockSource::interop_platform()]);

    let run = validate_platforms(&runtime).unwrap();
    assert!(run.verdict.is_pass());

    let entries = &run.instances[0].entries;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].handle_types, vec![MEMORY_DMA_BUF]);
    assert_eq!(entries[1].handle_types, vec![SEMAPHORE_SYNC_FD]);
    assert_eq!(entries[2].byte_size, 0);
}

#[test]
fn test_first_failing_platform_stops_scan() {
    let last = MockSource::interop_platform();
    let runtime = MockRuntime::with_platforms(vec![
        MockSource::interop_platform(),
        MockSource::memory_without_import(),
        last.clone(),
    ]);

    let run = validate_platforms(&runtime).unwrap();
    assert!(run.verdict.is_fail());
    assert_eq!(run.instance_count, 3);
    assert_eq!(run.instances.len(), 2);
    assert!(last.queried().is_empty());
}

#[test]
fn test_mixed_platforms_pass_with_skip_count() {
    let runtime = MockRuntime::with_platforms(vec![
        MockSource::no_extensions(),
        MockSource::interop_platform(),
        MockSource::no_extensions(),
    ]);

    let run = validate_platforms(&runtime).unwrap();
    assert!(run.verdict.is_pass());
    assert_eq!(run.skipped, 2);
    assert_eq!(run.instance_count, 3);
}

#[test]
fn test_zero_platforms_is_skipped() {
    let run = validate_platforms(&MockRuntime::default()).unwrap();
    assert!(run.verdict.is_skipped());
    assert_eq!(run.instance_count, 0);
    assert_eq!(run.skipped, 0);
}

#[test]
fn test_query_failure_aborts() {
    let platform = MockSource::interop_platform().failing_on(PLATFORM_SEMAPHORE_EXPORT, -30);
    let runtime = MockRuntime::with_platforms(vec![platform]);

    let err = validate_platforms(&runtime).unwrap_err();
    assert!(matches!(err, PreflightError::Transport { code: -30, .. }));
}

#[test]
fn test_enumeration_failure_aborts() {
    let err = validate_platforms(&MockRuntime::failing_enumeration(-1001)).unwrap_err();
    assert_eq!(err.to_string(), "clGetPlatformIDs failed with status -1001");
}

#[test]
fn test_misaligned_buffer_is_rejected() {
    let platform = MockSource::interop_platform().raw(PLATFORM_MEMORY_IMPORT, vec![0; 6]);
    let runtime = MockRuntime::with_platforms(vec![platform]);

    let err = validate_platforms(&runtime).unwrap_err();
    assert!(matches!(
        err,
        PreflightError::MisalignedInfo { byte_size: 6, width: 4, .. }
    ));
}

#[test]
fn test_rerun_is_identical() {
    let runtime = MockRuntime::with_platforms(vec![
        MockSource::interop_platform(),
        MockSource::no_extensions(),
    ]);

    let first = validate_platforms(&runtime).unwrap();
    let second = validate_platforms(&runtime).unwrap();
    assert_eq!(first, second);
}
