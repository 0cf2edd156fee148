//! Data module for interop-preflight
//!
//! Contains the static capability checklists.

pub mod checklist;
