//! Application-wide error types using thiserror.

use chatlens_common::InsightsError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Error from the configuration, storage or report layers.
    #[error(transparent)]
    Insights(#[from] InsightsError),

    /// Environment variable with an unusable value.
    #[error("Invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// JSON output error.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
