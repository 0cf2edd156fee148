//! Error types for interop-preflight operations.
//!
//! Contract violations are not errors: they become a `Fail` verdict and
//! live in [`crate::checks::classify::ContractViolation`]. Everything here
//! aborts the validator that hit it.

use thiserror::Error;

/// Errors that can abort a validation run.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// The driver rejected a query with a status other than "zero size".
    #[error("{operation} failed with status {code}")]
    Transport { operation: String, code: i32 },

    /// A handle-type buffer whose size is not a whole number of codes.
    #[error("{name} returned {byte_size} bytes, not a multiple of {width}")]
    MisalignedInfo {
        name: &'static str,
        byte_size: usize,
        width: usize,
    },

    /// The requested device index does not exist.
    #[error("device {index} not found ({available} device(s) available)")]
    DeviceNotFound { index: usize, available: usize },

    /// A fixture file describes a driver state that cannot be simulated.
    #[error("invalid fixture: {0}")]
    Fixture(String),

    /// A configuration or fixture file could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Config { path: String, message: String },

    /// No fixture was given and the OpenCL backend is not compiled in.
    #[error("no driver backend available: pass --fixture or build with the 'opencl' feature")]
    NoBackend,

    /// The selected output format was compiled out.
    #[error("output format '{0}' is not enabled in this build")]
    UnsupportedFormat(String),

    #[error("I/O error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PreflightError {
    /// Build a transport error for a named driver call.
    pub fn transport(operation: impl Into<String>, code: i32) -> Self {
        PreflightError::Transport {
            operation: operation.into(),
            code,
        }
    }

    /// Build an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PreflightError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = PreflightError> = std::result::Result<T, E>;
