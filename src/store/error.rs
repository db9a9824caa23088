//! Entity store error types
//!
//! Defines all errors that can occur in the data layer. None of them is
//! fatal: view code receives these as plain values and turns them into
//! flash messages.

use thiserror::Error;

/// Errors that can occur in an entity store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field was missing or a field value was out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// The identifying field collides (case-insensitively) with an existing record
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// No record with the requested id exists in the collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl StoreError {
    /// Validation error for an empty required field, naming the field.
    pub fn required(field: &str) -> Self {
        StoreError::Validation(format!("{} is required", field))
    }

    /// True for the user-correctable kinds a form can recover from.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_) | StoreError::Duplicate(_) | StoreError::NotFound(_)
        )
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
