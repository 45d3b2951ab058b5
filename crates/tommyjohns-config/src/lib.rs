//! # Tommy Johns Config
//!
//! Settings schema, defaults, loading, and validation.
//!
//! Settings are read once at startup from a TOML file, overlaid with
//! environment variables, validated, and then shared read-only.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::*;
pub use schema::*;
