// Copyright 2025 Cowboy AI, LLC.

//! Error types for schema and document operations

use thiserror::Error;

/// Errors that can occur while recording population or converting documents
#[derive(Debug, Clone, Error)]
pub enum PopulateError {
    /// A field name was used that the schema does not declare
    #[error("Unknown field: {field}")]
    UnknownField {
        /// Name of the undeclared field
        field: String,
    },

    /// Population was recorded against a field that is not a reference
    #[error("Not a reference field: {field}")]
    NotAReference {
        /// Name of the non-reference field
        field: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for schema and document operations
pub type PopulateResult<T> = Result<T, PopulateError>;

impl From<serde_json::Error> for PopulateError {
    fn from(err: serde_json::Error) -> Self {
        PopulateError::SerializationError(err.to_string())
    }
}

impl PopulateError {
    /// Check if this error concerns a field declaration
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            PopulateError::UnknownField { .. } | PopulateError::NotAReference { .. }
        )
    }

    /// Check if this is a serialization error
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, PopulateError::SerializationError(_))
    }
}
