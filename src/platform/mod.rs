//! Driver abstraction layer.
//!
//! Provides consistent interfaces for:
//! - Enumerating platforms and devices
//! - Extension advertisement queries
//! - Raw attribute queries returning owned byte buffers
//!
//! Two runtimes implement these traits: [`fixture::FixtureRuntime`], a
//! simulated driver described by a TOML or JSON file, and (with the
//! `opencl` feature) `opencl::OpenClRuntime`, which talks to the installed
//! ICD loader.

pub mod fixture;
pub mod handles;
#[cfg(feature = "opencl")]
pub mod opencl;

use crate::error::Result;
use serde::Serialize;
use std::fmt;

/// Extension that enables external memory import.
pub const EXTERNAL_MEMORY_EXTENSION: &str = "cl_khr_external_memory";

/// Extension that enables external semaphore import and export.
pub const EXTERNAL_SEMAPHORE_EXTENSION: &str = "cl_khr_external_semaphore";

/// Level at which a capability is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Platform,
    Device,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Platform => write!(f, "Platform"),
            Scope::Device => write!(f, "Device"),
        }
    }
}

/// One platform or device that can answer attribute queries.
pub trait CapabilitySource {
    /// Identifier used in diagnostics (name and driver handle).
    fn label(&self) -> String;

    /// Whether `name` appears in this instance's extension string.
    fn extension_available(&self, name: &str) -> bool;

    /// Query an attribute and return its full value.
    ///
    /// An empty buffer means the attribute is not supported by this
    /// instance. Any other driver failure is a
    /// [`PreflightError::Transport`](crate::PreflightError::Transport).
    fn query_info(&self, key: u32) -> Result<Vec<u8>>;
}

/// Access to a driver's platform registry and its devices.
pub trait InteropRuntime {
    type Platform: CapabilitySource;
    type Device: CapabilitySource;

    /// All platforms known to the runtime, in driver order.
    fn platforms(&self) -> Result<Vec<Self::Platform>>;

    /// All devices across every platform, in driver order.
    fn devices(&self) -> Result<Vec<Self::Device>>;
}

impl<T: CapabilitySource + ?Sized> CapabilitySource for &T {
    fn label(&self) -> String {
        (**self).label()
    }

    fn extension_available(&self, name: &str) -> bool {
        (**self).extension_available(name)
    }

    fn query_info(&self, key: u32) -> Result<Vec<u8>> {
        (**self).query_info(key)
    }
}
