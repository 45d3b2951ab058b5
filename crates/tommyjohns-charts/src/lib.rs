//! # Tommy Johns Charts
//!
//! Loads the surgery CSV into a [`SurgeryTable`], derives the three
//! aggregate views, and renders each one to an embeddable HTML fragment
//! with plotters' SVG backend.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod loader;
pub mod manager;
pub mod renderer;
pub mod types;

pub mod age_histogram;
pub mod recovery_times;
pub mod surgeries_by_year;

pub use aggregator::*;
pub use loader::*;
pub use manager::*;
pub use renderer::*;
pub use types::*;

pub use age_histogram::{AgeHistogramChart, HistogramBins};
pub use recovery_times::RecoveryTimesChart;
pub use surgeries_by_year::SurgeriesByYearChart;
