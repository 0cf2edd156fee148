//! Mock runtime implementations for testing.
//!
//! Provides configurable mocks that simulate:
//! - Platforms and devices advertising any extension combination
//! - Attributes reporting handle-type lists, raw bytes, or nothing
//! - Transport failures on individual queries or on enumeration

use interop_preflight::data::checklist;
use interop_preflight::error::Result;
use interop_preflight::platform::handles::encode_handle_types;
use interop_preflight::platform::{
    CapabilitySource, InteropRuntime, EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION,
};
use interop_preflight::PreflightError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const PLATFORM_SEMAPHORE_IMPORT: u32 = checklist::CL_PLATFORM_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR;
pub const PLATFORM_SEMAPHORE_EXPORT: u32 = checklist::CL_PLATFORM_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR;
pub const PLATFORM_MEMORY_IMPORT: u32 = checklist::CL_PLATFORM_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR;

pub const DEVICE_SEMAPHORE_IMPORT: u32 = checklist::CL_DEVICE_SEMAPHORE_IMPORT_HANDLE_TYPES_KHR;
pub const DEVICE_SEMAPHORE_EXPORT: u32 = checklist::CL_DEVICE_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR;
pub const DEVICE_MEMORY_IMPORT: u32 = checklist::CL_DEVICE_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR;

pub const SEMAPHORE_OPAQUE_FD: u32 = 0x2055;
pub const SEMAPHORE_SYNC_FD: u32 = 0x2058;
pub const MEMORY_OPAQUE_FD: u32 = 0x2060;
pub const MEMORY_DMA_BUF: u32 = 0x2067;

/// A platform or device answering from in-memory tables.
///
/// Clones share the query log, so queries made through a runtime's
/// enumerated copies are visible on the original.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    pub label: String,
    pub extensions: Vec<String>,
    pub values: HashMap<u32, Vec<u8>>,
    pub failing: HashMap<u32, i32>,
    queries: Rc<RefCell<Vec<u32>>>,
}

impl MockSource {
    pub fn new(label: &str) -> Self {
        MockSource {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn reporting(mut self, key: u32, codes: &[u32]) -> Self {
        self.values.insert(key, encode_handle_types(codes));
        self
    }

    pub fn raw(mut self, key: u32, bytes: Vec<u8>) -> Self {
        self.values.insert(key, bytes);
        self
    }

    pub fn failing_on(mut self, key: u32, status: i32) -> Self {
        self.failing.insert(key, status);
        self
    }

    /// Keys queried so far, in order
    pub fn queried(&self) -> Vec<u32> {
        self.queries.borrow().clone()
    }

    /// Advertises neither extension
    pub fn no_extensions() -> Self {
        MockSource::new("bare")
    }

    /// Advertises external memory but reports no import handle types
    pub fn memory_without_import() -> Self {
        MockSource::new("memory-only").with_extensions(&[EXTERNAL_MEMORY_EXTENSION])
    }

    /// Advertises external semaphores but reports neither direction
    pub fn semaphore_without_handle_types() -> Self {
        MockSource::new("semaphore-only")
            .with_extensions(&[EXTERNAL_SEMAPHORE_EXTENSION])
            .reporting(PLATFORM_MEMORY_IMPORT, &[MEMORY_OPAQUE_FD])
    }

    /// Both extensions, memory import and semaphore export populated
    pub fn interop_platform() -> Self {
        MockSource::new("interop")
            .with_extensions(&[EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION])
            .reporting(PLATFORM_MEMORY_IMPORT, &[MEMORY_DMA_BUF])
            .reporting(PLATFORM_SEMAPHORE_EXPORT, &[SEMAPHORE_SYNC_FD])
    }

    /// Both extensions, every device attribute populated
    pub fn interop_device() -> Self {
        MockSource::new("interop-device")
            .with_extensions(&[EXTERNAL_MEMORY_EXTENSION, EXTERNAL_SEMAPHORE_EXTENSION])
            .reporting(DEVICE_SEMAPHORE_IMPORT, &[SEMAPHORE_OPAQUE_FD])
            .reporting(DEVICE_SEMAPHORE_EXPORT, &[SEMAPHORE_SYNC_FD, SEMAPHORE_OPAQUE_FD])
            .reporting(DEVICE_MEMORY_IMPORT, &[MEMORY_OPAQUE_FD, MEMORY_DMA_BUF])
    }
}

impl CapabilitySource for MockSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn extension_available(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }

    fn query_info(&self, key: u32) -> Result<Vec<u8>> {
        self.queries.borrow_mut().push(key);
        if let Some(status) = self.failing.get(&key) {
            return Err(PreflightError::transport(format!("query({:#x})", key), *status));
        }
        Ok(self.values.get(&key).cloned().unwrap_or_default())
    }
}

/// A runtime built from mock platforms and devices.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    pub platforms: Vec<MockSource>,
    pub devices: Vec<MockSource>,
    /// Status returned by platform enumeration, if it should fail
    pub enumeration_error: Option<i32>,
}

impl MockRuntime {
    pub fn with_platforms(platforms: Vec<MockSource>) -> Self {
        MockRuntime {
            platforms,
            ..Default::default()
        }
    }

    pub fn with_devices(devices: Vec<MockSource>) -> Self {
        MockRuntime {
            devices,
            ..Default::default()
        }
    }

    pub fn failing_enumeration(status: i32) -> Self {
        MockRuntime {
            enumeration_error: Some(status),
            ..Default::default()
        }
    }
}

impl InteropRuntime for MockRuntime {
    type Platform = MockSource;
    type Device = MockSource;

    fn platforms(&self) -> Result<Vec<MockSource>> {
        match self.enumeration_error {
            Some(status) => Err(PreflightError::transport("clGetPlatformIDs", status)),
            None => Ok(self.platforms.clone()),
        }
    }

    fn devices(&self) -> Result<Vec<MockSource>> {
        Ok(self.devices.clone())
    }
}
