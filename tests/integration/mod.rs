//! Integration tests for interop-preflight.
//!
//! These tests drive the validators through mock runtimes and the binary
//! through fixture files.

pub mod device_tests;
pub mod platform_tests;
