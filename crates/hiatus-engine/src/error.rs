//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the frame
//! loop so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hiatus_core::config::ConfigError,
    },

    /// The log filter or subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },

    /// The end-of-run summary could not be serialized.
    #[error("summary error: {source}")]
    Summary {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
