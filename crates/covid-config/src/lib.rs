//! # Covid Config
//!
//! Type-safe configuration management for covid-charts.
//!
//! Configuration is read once at startup from a TOML file, overridden from
//! the environment, validated, and then treated as read-only.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
