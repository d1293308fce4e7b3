//! AdCraft CLI — error types.

use adcraft_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The conversation could not run to an outcome.
    #[error("conversation error: {0}")]
    Domain(#[from] DomainError),

    /// Writing the final report failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the final report failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
