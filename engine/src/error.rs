//! Engine-specific error types with reason codes.

use thiserror::Error;

/// Reason codes for engine errors, providing machine-readable context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// An ingestion payload failed the required-field invariant.
    PayloadInvalid = 100,
    /// Filter criteria could not be interpreted.
    QueryInvalid = 200,
    /// The report store collaborator failed.
    StoreFailed = 300,
    /// Serialization or deserialization failed.
    SerializationFailed = 400,
}

/// Errors that can occur during engine operations.
///
/// Malformed classification inputs (unparseable sleep timeouts, unrecognized
/// platform tags) are never errors: they degrade to documented sentinel or
/// false values. Empty populations and empty trend buckets are valid
/// zero-valued results, not errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A submitted report payload is malformed or incomplete.
    #[error("Validation error (reason {reason}): {message}")]
    Validation { reason: u32, message: String },

    /// Filter criteria are malformed (unknown status, bad limit).
    #[error("Query error (reason {reason}): {message}")]
    Query { reason: u32, message: String },

    /// The report store failed reading or writing the population.
    #[error("Store error (reason {reason}): {message}")]
    Store { reason: u32, message: String },

    /// Serialization or deserialization failed.
    #[error("Serialization error (reason {reason}): {message}")]
    Serialization { reason: u32, message: String },
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            reason: ReasonCode::PayloadInvalid as u32,
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            reason: ReasonCode::QueryInvalid as u32,
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            reason: ReasonCode::StoreFailed as u32,
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            reason: ReasonCode::SerializationFailed as u32,
            message: message.into(),
        }
    }
}

impl From<posturewatch_common::ValidationError> for EngineError {
    fn from(err: posturewatch_common::ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::store(err.to_string())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
