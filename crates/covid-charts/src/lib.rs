//! # Covid Charts
//!
//! Batch tool rendering aligned growth-curve charts from the Johns Hopkins
//! CSSE COVID-19 time-series tables.
//!
//! The binary loads configuration, initialises logging and runs a
//! [`ChartPipeline`] over the CSV tables, writing PNG files to the
//! configured output directory.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pipeline;

pub use error::*;
pub use pipeline::*;
