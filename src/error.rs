use thiserror::Error;

/// Failure categories surfaced to the presentation layer. Every service
/// operation returns one of these instead of letting a store error escape.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Empty required field or non-integer input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The name (or selection) does not match any record. Nothing was written.
    #[error("{0}")]
    NotFound(String),

    /// Anything else, usually SQLite. Keeps the context chain for the footer.
    #[error("Unexpected error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    /// Validation and not-found errors are user mistakes shown as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, ServiceError::Validation(_) | ServiceError::NotFound(_))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
