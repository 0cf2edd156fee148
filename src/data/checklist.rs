//! Capability checklists
//!
//! The fixed, ordered attribute tables walked for each scope. Order only
//! affects log ordering and where an immediate failure short-circuits.

use crate::platform::Scope;
use serde::Serialize;

/// What a checklist attribute reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleQuery {
    ExternalMemoryImport,
    SemaphoreExport,
    SemaphoreImport,
}

impl HandleQuery {
    /// Whether this attribute belongs to the external semaphore extension.
    pub fn is_semaphore(self) -> bool {
        matches!(self, HandleQuery::SemaphoreExport | HandleQuery::SemaphoreImport)
    }
}

/// One attribute in a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityEntry {
    pub key: u32,
    pub name: &'static str,
    pub kind: HandleQuery,
}

pub const CL_PLATFORM_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR: u32 = 0x2037;
pub const CL_PLATFORM_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR: u32 = 0x2038;
pub const CL_PLATFORM_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR: u32 = 0x2044;
pub const CL_DEVICE_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR: u32 = 0x204D;
pub const CL_DEVICE_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR: u32 = 0x204E;
pub const CL_DEVICE_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR: u32 = 0x204F;

macro_rules! entry {
    ($key:ident, $kind:ident) => {
        CapabilityEntry {
            key: $key,
            name: stringify!($key),
            kind: HandleQuery::$kind,
        }
    };
}

/// Platform-scoped attributes, in walk order.
pub static PLATFORM_CHECKLIST: [CapabilityEntry; 3] = [
    entry!(CL_PLATFORM_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR, ExternalMemoryImport),
    entry!(CL_PLATFORM_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR, SemaphoreExport),
    entry!(CL_PLATFORM_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR, SemaphoreImport),
];

/// Device-scoped attributes, in walk order.
pub static DEVICE_CHECKLIST: [CapabilityEntry; 3] = [
    entry!(CL_DEVICE_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR, SemaphoreImport),
    entry!(CL_DEVICE_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR, SemaphoreExport),
    entry!(CL_DEVICE_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR, ExternalMemoryImport),
];

/// Get the checklist for a scope
pub fn checklist(scope: Scope) -> &'static [CapabilityEntry] {
    match scope {
        Scope::Platform => &PLATFORM_CHECKLIST,
        Scope::Device => &DEVICE_CHECKLIST,
    }
}

/// Find an entry of a scope by its display name
pub fn find_by_name(scope: Scope, name: &str) -> Option<&'static CapabilityEntry> {
    checklist(scope).iter().find(|e| e.name == name)
}

/// Find an entry of a scope by attribute key
pub fn find_by_key(scope: Scope, key: u32) -> Option<&'static CapabilityEntry> {
    checklist(scope).iter().find(|e| e.key == key)
}
