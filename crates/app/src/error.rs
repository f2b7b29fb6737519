//! Demo error types.

use domain::ValidationError;
use thiserror::Error;

/// Errors that can end the walkthrough.
#[derive(Debug, Error)]
pub enum AppError {
    /// An intent was rejected before anything was appended.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The rebuilt state could not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
