//! Per-instance classification.
//!
//! Walks one checklist against one platform or device and decides whether
//! the instance is excluded, passes, or violates the advertising contract.

use crate::data::checklist::{CapabilityEntry, HandleQuery};
use crate::error::Result;
use crate::platform::handles::{decode_handle_types, describe_handle_type};
use crate::platform::{CapabilitySource, Scope, EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Advertised extension without the capability data to back it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractViolation {
    /// External memory advertised, import handle types empty.
    MemoryImportNotReported,
    /// External semaphore advertised, neither direction reports handle types.
    NoSemaphoreHandleTypes,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::MemoryImportNotReported => write!(
                f,
                "External memory import handle types should be reported if {} is available.",
                EXTERNAL_MEMORY_EXTENSION
            ),
            ContractViolation::NoSemaphoreHandleTypes => write!(
                f,
                "External semaphore import/export or both should be supported if {} is available.",
                EXTERNAL_SEMAPHORE_EXTENSION
            ),
        }
    }
}

/// Which interop extensions an instance advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtensionAvailability {
    pub external_memory: bool,
    pub external_semaphore: bool,
}

impl ExtensionAvailability {
    pub fn probe<S: CapabilitySource + ?Sized>(source: &S) -> Self {
        ExtensionAvailability {
            external_memory: source.extension_available(EXTERNAL_MEMORY_EXTENSION),
            external_semaphore: source.extension_available(EXTERNAL_SEMAPHORE_EXTENSION),
        }
    }

    /// Whether at least one extension is advertised.
    pub fn any(&self) -> bool {
        self.external_memory || self.external_semaphore
    }
}

/// Result of querying one checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub name: &'static str,
    pub key: u32,
    pub kind: HandleQuery,
    pub byte_size: usize,
    pub handle_types: Vec<u32>,
}

impl EntryReport {
    pub fn supported(&self) -> bool {
        self.byte_size > 0
    }
}

/// Terminal state of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "violation", rename_all = "snake_case")]
pub enum InstanceOutcome {
    /// Neither extension advertised; nothing was queried.
    Excluded,
    Pass,
    Fail(ContractViolation),
}

/// Everything learned about one platform or device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceReport {
    pub scope: Scope,
    pub index: usize,
    pub label: String,
    pub extensions: ExtensionAvailability,
    /// Entries queried, in checklist order. Stops at an immediate failure.
    pub entries: Vec<EntryReport>,
    #[serde(flatten)]
    pub outcome: InstanceOutcome,
}

/// Classify one instance against a checklist.
///
/// Transport and decoding errors abort with `Err`; contract violations are
/// reported through [`InstanceOutcome::Fail`].
pub fn classify_instance<S: CapabilitySource + ?Sized>(
    scope: Scope,
    index: usize,
    source: &S,
    checklist: &[CapabilityEntry],
) -> Result<InstanceReport> {
    let extensions = ExtensionAvailability::probe(source);
    let mut report = InstanceReport {
        scope,
        index,
        label: source.label(),
        extensions,
        entries: Vec::new(),
        outcome: InstanceOutcome::Excluded,
    };

    if !extensions.any() {
        info!(
            "{} {} does not support '{}' and '{}'. Skipping the test.",
            scope, index, EXTERNAL_SEMAPHORE_EXTENSION, EXTERNAL_MEMORY_EXTENSION
        );
        return Ok(report);
    }

    info!("{} {} ({}) info:", scope, index, report.label);

    let mut supports_atleast_one_sema_query = false;

    for entry in checklist {
        let bytes = source.query_info(entry.key)?;
        debug!(attribute = entry.name, byte_size = bytes.len(), "queried attribute");

        let handle_types = decode_handle_types(entry.name, &bytes)?;
        report.entries.push(EntryReport {
            name: entry.name,
            key: entry.key,
            kind: entry.kind,
            byte_size: bytes.len(),
            handle_types,
        });

        if bytes.is_empty() {
            if entry.kind == HandleQuery::ExternalMemoryImport && extensions.external_memory {
                let violation = ContractViolation::MemoryImportNotReported;
                warn!("{}", violation);
                report.outcome = InstanceOutcome::Fail(violation);
                return Ok(report);
            }
            info!("{} not supported. Skipping the query.", entry.name);
            continue;
        }

        if entry.kind.is_semaphore() {
            supports_atleast_one_sema_query = true;
        }

        info!("{}:", entry.name);
        if let Some(last) = report.entries.last() {
            for code in &last.handle_types {
                info!("{}", describe_handle_type(*code));
            }
        }
    }

    report.outcome = if extensions.external_semaphore && !supports_atleast_one_sema_query {
        let violation = ContractViolation::NoSemaphoreHandleTypes;
        warn!("{}", violation);
        InstanceOutcome::Fail(violation)
    } else {
        InstanceOutcome::Pass
    };

    Ok(report)
}
