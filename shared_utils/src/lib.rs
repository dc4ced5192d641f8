//! Shared Utilities for the img-convert tools
//!
//! This crate provides common functionality shared by the conversion binaries:
//! - Logging bootstrap (stderr + rolling file)
//! - Conversion error taxonomy
//! - Batch bookkeeping and non-recursive directory enumeration
//! - Summary reporting
//! - Type-safe file size wrapper

pub mod batch;
pub mod common_utils;
pub mod img_errors;
pub mod logging;
pub mod report;
pub mod types;

pub use batch::*;
pub use report::*;

pub use img_errors::{ConvertError, Result};

pub use types::FileSize;
