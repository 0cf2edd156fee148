//! Simulated driver backed by a fixture file.
//!
//! A fixture describes platforms, their devices, the extensions each one
//! advertises and the handle types each attribute reports:
//!
//! ```toml
//! [[platforms]]
//! name = "Simulated Platform"
//! extensions = ["cl_khr_external_memory", "cl_khr_external_semaphore"]
//!
//! [platforms.handle_types]
//! CL_PLATFORM_EXTERNAL_MEMORY_IMPORT_HANDLE_TYPES_KHR = [0x2060]
//! CL_PLATFORM_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR = [0x2058]
//!
//! [[platforms.devices]]
//! name = "Simulated Device"
//! extensions = ["cl_khr_external_semaphore"]
//! failing = { CL_DEVICE_SEMAPHORE_EXPORT_HANDLE_TYPES_KHR = -30 }
//! ```
//!
//! Attributes that are not listed answer with an empty buffer. `raw`
//! overrides an attribute with exact bytes, and `failing` makes the query
//! fail with the given status code.

use crate::data::checklist;
use crate::error::{PreflightError, Result};
use crate::platform::handles::encode_handle_types;
use crate::platform::{CapabilitySource, InteropRuntime, Scope};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One platform or device as written in a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FixtureInstance {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub handle_types: BTreeMap<String, Vec<u32>>,
    #[serde(default)]
    pub raw: BTreeMap<String, Vec<u8>>,
    #[serde(default)]
    pub failing: BTreeMap<String, i32>,
}

/// A platform and the devices it exposes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FixturePlatform {
    #[serde(flatten)]
    pub instance: FixtureInstance,
    #[serde(default)]
    pub devices: Vec<FixtureInstance>,
}

/// Top-level fixture document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default)]
    pub platforms: Vec<FixturePlatform>,
    /// Status returned by platform enumeration, if it should fail.
    #[serde(default)]
    pub platform_ids_error: Option<i32>,
}

/// A fixture instance with attribute names resolved to keys.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    scope: Scope,
    name: String,
    extensions: Vec<String>,
    values: HashMap<u32, Vec<u8>>,
    failing: HashMap<u32, i32>,
}

impl FixtureSource {
    fn resolve(scope: Scope, instance: &FixtureInstance) -> Result<Self> {
        let lookup = |name: &str| {
            checklist::find_by_name(scope, name).map(|e| e.key).ok_or_else(|| {
                PreflightError::Fixture(format!(
                    "{} '{}' lists unknown attribute {}",
                    scope, instance.name, name
                ))
            })
        };

        let mut values = HashMap::new();
        for (name, codes) in &instance.handle_types {
            values.insert(lookup(name)?, encode_handle_types(codes));
        }
        for (name, bytes) in &instance.raw {
            values.insert(lookup(name)?, bytes.clone());
        }

        let mut failing = HashMap::new();
        for (name, code) in &instance.failing {
            if *code == 0 {
                return Err(PreflightError::Fixture(format!(
                    "{} '{}' fails {} with status 0",
                    scope, instance.name, name
                )));
            }
            failing.insert(lookup(name)?, *code);
        }

        Ok(FixtureSource {
            scope,
            name: instance.name.clone(),
            extensions: instance.extensions.clone(),
            values,
            failing,
        })
    }

    fn operation(&self) -> &'static str {
        match self.scope {
            Scope::Platform => "clGetPlatformInfo",
            Scope::Device => "clGetDeviceInfo",
        }
    }
}

impl CapabilitySource for FixtureSource {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn extension_available(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }

    fn query_info(&self, key: u32) -> Result<Vec<u8>> {
        if let Some(code) = self.failing.get(&key) {
            return Err(PreflightError::transport(
                format!("{}({:#x})", self.operation(), key),
                *code,
            ));
        }
        Ok(self.values.get(&key).cloned().unwrap_or_default())
    }
}

/// Runtime that answers every query from a fixture.
#[derive(Debug, Clone)]
pub struct FixtureRuntime {
    platforms: Vec<FixtureSource>,
    devices: Vec<FixtureSource>,
    platform_ids_error: Option<i32>,
}

impl FixtureRuntime {
    /// Build a runtime, checking every attribute name in the fixture.
    pub fn new(fixture: &Fixture) -> Result<Self> {
        let mut platforms = Vec::with_capacity(fixture.platforms.len());
        let mut devices = Vec::new();

        for platform in &fixture.platforms {
            platforms.push(FixtureSource::resolve(Scope::Platform, &platform.instance)?);
            for device in &platform.devices {
                devices.push(FixtureSource::resolve(Scope::Device, device)?);
            }
        }

        Ok(FixtureRuntime {
            platforms,
            devices,
            platform_ids_error: fixture.platform_ids_error,
        })
    }

    pub fn from_toml_str(content: &str, path: &str) -> Result<Self> {
        let fixture: Fixture = toml::from_str(content).map_err(|e| PreflightError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::new(&fixture)
    }

    pub fn from_json_str(content: &str, path: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(content).map_err(|e| PreflightError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::new(&fixture)
    }

    /// Load a fixture file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PreflightError::io(format!("reading fixture {}", display), e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content, &display),
            _ => Self::from_toml_str(&content, &display),
        }
    }
}

impl InteropRuntime for FixtureRuntime {
    type Platform = FixtureSource;
    type Device = FixtureSource;

    fn platforms(&self) -> Result<Vec<FixtureSource>> {
        if let Some(code) = self.platform_ids_error {
            return Err(PreflightError::transport("clGetPlatformIDs", code));
        }
        Ok(self.platforms.clone())
    }

    fn devices(&self) -> Result<Vec<FixtureSource>> {
        Ok(self.devices.clone())
    }
}
