//! Command line arguments for interop-preflight.

use crate::Suite;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Command to execute
#[derive(Subcommand, Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// Run validation suites (default)
    #[default]
    Check,
    /// Print version information
    Version,
    /// List all available suites
    List,
}

/// Output format selection
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// OpenCL interop capability conformance checks
#[derive(Parser, Debug, Clone)]
#[command(name = "interop-preflight", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Run only this suite (repeatable)
    #[arg(long, value_enum, global = true)]
    pub only: Vec<Suite>,

    /// Skip this suite (repeatable)
    #[arg(long, value_enum, global = true)]
    pub skip: Vec<Suite>,

    /// Device under test for device_info, by enumeration order
    #[arg(long, global = true)]
    pub device_index: Option<usize>,

    /// Simulated driver fixture (TOML or JSON) instead of the system runtime
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// Load defaults from a TOML configuration file
    #[arg(long, env = "INTEROP_PREFLIGHT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, env = "INTEROP_PREFLIGHT_FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    /// Only output failures
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Include per-attribute diagnostics and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output (also honours NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Stop after the first failed suite
    #[arg(long, global = true)]
    pub fail_fast: bool,
}

impl Args {
    /// The command to run, defaulting to `check`
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}
