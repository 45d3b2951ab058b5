//! # Tommy Johns Common
//!
//! Shared types, errors, logging, and utilities for the Tommy Johns
//! workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TjError};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
