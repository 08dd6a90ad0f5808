//! Error types for ftwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FtError
pub type Result<T> = std::result::Result<T, FtError>;

/// Unified error type for ftwire operations
#[derive(Debug, Error)]
pub enum FtError {
    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("The field name {field:?} is not known")]
    UnknownField { field: String },

    #[error("The field {field:?} has an invalid encoded value: {reason}")]
    InvalidEncoding { field: String, reason: String },

    #[error("The field {field:?} has invalid enum value {value:?}")]
    InvalidEnumValue { field: String, value: String },

    #[error("The field {field:?} has invalid numeric value {value:?}: {reason}")]
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Tooling Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FtError {
    /// Wire name of the field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            FtError::UnknownField { field }
            | FtError::InvalidEncoding { field, .. }
            | FtError::InvalidEnumValue { field, .. }
            | FtError::InvalidNumber { field, .. } => Some(field.as_str()),
            FtError::Io(_) | FtError::Serialization(_) => None,
        }
    }
}

/// Error returned when a string is not one of an enum's canonical names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized enum value {value:?}")]
pub struct EnumParseError {
    pub value: String,
}
