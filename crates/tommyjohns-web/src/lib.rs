//! # Tommy Johns Web
//!
//! Serves the pre-built surgery charts and the spreadsheet list over HTTP,
//! and hosts the startup tasks the `tommyjohns` binary runs: database
//! initialization, the chart build, and the spreadsheet importer.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod db;
pub mod error;
pub mod routes;
pub mod sheets;
pub mod state;
pub mod templates;

pub use error::*;
pub use routes::build_router;
pub use state::AppState;
