//! Application-wide error types using thiserror.

use covid_common::CovidError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[source] CovidError),

    /// Logging could not be initialised.
    #[error("Logging setup failed: {0}")]
    Logging(#[source] CovidError),

    /// Reading, aligning, rendering or writing a chart failed.
    #[error("Chart generation failed: {0}")]
    Pipeline(#[from] CovidError),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
