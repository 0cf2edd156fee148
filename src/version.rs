//! Version and build information.
//!
//! Provides version, git commit, and build metadata.

use std::fmt;

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub target: &'static str,
    pub rustc_version: Option<&'static str>,
    /// Whether the system OpenCL backend was compiled in
    pub opencl: bool,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "interop-preflight {}", self.version)?;

        if let Some(commit) = self.commit {
            writeln!(f, "Commit: {}", commit)?;
        }

        if let Some(date) = self.build_date {
            writeln!(f, "Built: {}", date)?;
        }

        writeln!(f, "Target: {}", self.target)?;
        writeln!(
            f,
            "Backends: fixture{}",
            if self.opencl { ", opencl" } else { "" }
        )?;

        if let Some(rustc) = self.rustc_version {
            write!(f, "Rustc: {}", rustc)?;
        }

        Ok(())
    }
}

/// Get build information
pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("INTEROP_PREFLIGHT_GIT_HASH"),
        build_date: option_env!("INTEROP_PREFLIGHT_BUILD_DATE"),
        target: option_env!("INTEROP_PREFLIGHT_TARGET").unwrap_or(std::env::consts::ARCH),
        rustc_version: option_env!("INTEROP_PREFLIGHT_RUSTC_VERSION"),
        opencl: cfg!(feature = "opencl"),
    }
}
