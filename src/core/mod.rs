//! Core library components.
//!
//! This module contains the reusable logic for path resolution, parameter
//! retrieval, key provisioning, and bulk writes. The CLI in `crate::cli` is
//! a thin layer over these.

pub mod client;
pub mod import_export;
pub mod keys;
pub mod parameters;
pub mod path;
pub mod remote;
pub mod writer;
