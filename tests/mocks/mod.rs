//! Mock implementations for testing without an OpenCL driver.
//!
//! This module provides configurable in-memory runtimes that can simulate
//! platforms and devices with any extension set, any handle-type report,
//! and failing queries.

pub mod runtime;

pub use runtime::*;
