//! # Covid Common
//!
//! Shared types, utilities, and common functionality for covid-charts.
//!
//! This crate provides the error taxonomy, logging bootstrap and domain
//! newtypes used across all other crates in the workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{CovidError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
