//! Configuration file support.
//!
//! An optional TOML file supplies defaults for the check command; flags
//! given on the command line take precedence.
//!
//! ```toml
//! suites = ["device_info"]
//! device_index = 1
//! fail_fast = true
//! fixture = "fixtures/driver.toml"   # relative to this file
//! format = "json"
//! ```

use crate::cli::args::{Args, OutputFormat};
use crate::error::{PreflightError, Result};
use crate::{PreflightConfig, Suite};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub suites: Option<Vec<Suite>>,
    pub skip: Option<Vec<Suite>>,
    pub device_index: Option<usize>,
    pub fail_fast: Option<bool>,
    pub fixture: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PreflightError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a configuration file, resolving `fixture` against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PreflightError::io(format!("reading config {}", display), e))?;
        let mut config = Self::from_toml_str(&content, &display)?;

        if let (Some(fixture), Some(dir)) = (config.fixture.as_ref(), path.parent()) {
            if fixture.is_relative() {
                config.fixture = Some(dir.join(fixture));
            }
        }

        Ok(config)
    }
}

impl PreflightConfig {
    /// Merge command line arguments over file settings
    pub fn from_args(args: &Args, file: &FileConfig) -> Self {
        PreflightConfig {
            suites: if args.only.is_empty() {
                file.suites.clone().unwrap_or_default()
            } else {
                args.only.clone()
            },
            skip: if args.skip.is_empty() {
                file.skip.clone().unwrap_or_default()
            } else {
                args.skip.clone()
            },
            device_index: args.device_index.or(file.device_index).unwrap_or(0),
            fail_fast: args.fail_fast || file.fail_fast.unwrap_or(false),
            fixture: args.fixture.clone().or_else(|| file.fixture.clone()),
        }
    }
}
