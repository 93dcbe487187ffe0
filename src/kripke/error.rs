//! Generation and persistence error types.

use crate::execution::RingletError;
use crate::property::PropertyError;
use thiserror::Error;

/// Errors that abort a generation run. No partial structure is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerateError {
    /// A step broke the ringlet's snapshot invariant.
    #[error(transparent)]
    Ringlet(#[from] RingletError),

    /// A spun value could not be written back into the external variables.
    #[error("Failed to apply external value: {0}")]
    Property(#[from] PropertyError),

    #[error("Unknown state '{id}'")]
    UnknownState { id: String },

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Exploration exceeded the limit of {limit} jobs")]
    JobLimitExceeded { limit: usize },
}

/// Errors that can occur while saving or loading a structure
#[derive(Debug, Error)]
pub enum PersistError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported structure version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Loaded data refers to nodes that do not exist
    #[error("Structure validation failed: {0}")]
    ValidationFailed(String),
}
