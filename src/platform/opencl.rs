//! OpenCL driver backend.
//!
//! Answers queries through the installed ICD loader via the `opencl3`
//! crate. Only compiled with the `opencl` feature.

use crate::error::{PreflightError, Result};
use crate::platform::{CapabilitySource, InteropRuntime};
use opencl3::device::{Device, CL_DEVICE_TYPE_ALL};
use opencl3::platform::{get_platforms, Platform};
use tracing::{debug, warn};

/// Whether `name` is one of the space-separated tokens of an extension string.
fn extension_listed(extensions: &str, name: &str) -> bool {
    extensions.split_whitespace().any(|e| e == name)
}

/// A platform from the OpenCL registry.
#[derive(Debug, Clone, Copy)]
pub struct OpenClPlatform {
    platform: Platform,
}

impl CapabilitySource for OpenClPlatform {
    fn label(&self) -> String {
        let name = self.platform.name().unwrap_or_default();
        format!("{} (id {:p})", name, self.platform.id())
    }

    fn extension_available(&self, name: &str) -> bool {
        match self.platform.extensions() {
            Ok(extensions) => extension_listed(&extensions, name),
            Err(e) => {
                warn!("clGetPlatformInfo(CL_PLATFORM_EXTENSIONS) failed: {}", e);
                false
            }
        }
    }

    fn query_info(&self, key: u32) -> Result<Vec<u8>> {
        self.platform
            .get_data(key)
            .map_err(|e| PreflightError::transport(format!("clGetPlatformInfo({:#x})", key), e.0))
    }
}

/// A device of any type on any platform.
#[derive(Debug, Clone, Copy)]
pub struct OpenClDevice {
    device: Device,
}

impl CapabilitySource for OpenClDevice {
    fn label(&self) -> String {
        let name = self.device.name().unwrap_or_default();
        format!("{} (id {:p})", name, self.device.id())
    }

    fn extension_available(&self, name: &str) -> bool {
        match self.device.extensions() {
            Ok(extensions) => extension_listed(&extensions, name),
            Err(e) => {
                warn!("clGetDeviceInfo(CL_DEVICE_EXTENSIONS) failed: {}", e);
                false
            }
        }
    }

    fn query_info(&self, key: u32) -> Result<Vec<u8>> {
        self.device
            .get_data(key)
            .map_err(|e| PreflightError::transport(format!("clGetDeviceInfo({:#x})", key), e.0))
    }
}

/// The system's OpenCL runtime.
#[derive(Debug, Default)]
pub struct OpenClRuntime;

impl OpenClRuntime {
    pub fn new() -> Self {
        OpenClRuntime
    }
}

impl InteropRuntime for OpenClRuntime {
    type Platform = OpenClPlatform;
    type Device = OpenClDevice;

    fn platforms(&self) -> Result<Vec<OpenClPlatform>> {
        let platforms = get_platforms().map_err(|e| PreflightError::transport("clGetPlatformIDs", e.0))?;
        Ok(platforms
            .into_iter()
            .map(|platform| OpenClPlatform { platform })
            .collect())
    }

    fn devices(&self) -> Result<Vec<OpenClDevice>> {
        let mut devices = Vec::new();
        for platform in get_platforms().map_err(|e| PreflightError::transport("clGetPlatformIDs", e.0))? {
            let ids = platform
                .get_devices(CL_DEVICE_TYPE_ALL)
                .map_err(|e| PreflightError::transport("clGetDeviceIDs", e.0))?;
            debug!(platform = ?platform.id(), count = ids.len(), "enumerated devices");
            devices.extend(ids.into_iter().map(|id| OpenClDevice {
                device: Device::new(id),
            }));
        }
        Ok(devices)
    }
}
