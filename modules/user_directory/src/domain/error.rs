use thiserror::Error;
use uuid::Uuid;

use crate::domain::validate::FieldErrors;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    NotFound { id: Uuid },

    #[error("Validation failed")]
    Validation { errors: FieldErrors },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
