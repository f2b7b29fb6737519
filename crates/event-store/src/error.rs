use thiserror::Error;

/// Errors that can occur around the event log.
///
/// Appending and reading never fail; the only fallible operation is turning a
/// stored envelope into JSON for diagnostics.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventLogError>;
