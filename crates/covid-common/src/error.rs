//! Error types and utilities for covid-charts

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for covid-charts operations
pub type Result<T> = std::result::Result<T, CovidError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for covid-charts operations
#[derive(Error, Debug)]
pub enum CovidError {
    /// An excluded region is absent from the table, which usually means the
    /// upstream schema or naming changed.
    #[error("Region '{region}' not found in table")]
    MissingRegion { region: String },

    /// The tabular source could not be read or does not have the expected shape
    #[error("Failed to read source {}: {message}", path.display())]
    SourceRead {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A rendered chart could not be written to the sink
    #[error("Failed to write chart {}: {message}", path.display())]
    SinkWrite {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid arguments passed to an operation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CovidError {
    /// Create a missing region error
    pub fn missing_region(region: impl Into<String>) -> Self {
        Self::MissingRegion {
            region: region.into(),
        }
    }

    /// Create a source read error
    pub fn source_read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SourceRead {
            path: path.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a source read error with source
    pub fn source_read_with_source(
        path: impl Into<PathBuf>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SourceRead {
            path: path.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a sink write error with source
    pub fn sink_write_with_source(
        path: impl Into<PathBuf>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SinkWrite {
            path: path.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a sink write error
    pub fn sink_write(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SinkWrite {
            path: path.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// Convert from toml::de::Error to CovidError
impl From<toml::de::Error> for CovidError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to CovidError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for CovidError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
