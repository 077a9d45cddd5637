//! Common utilities for devault-subver
//!
//! This crate provides the ambient plumbing shared by the binaries:
//! error types and tracing subscriber setup.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{LOG_LEVELS, is_valid_level, setup_logging};
