use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::validate::FieldErrors;

/// REST-level outcome errors. Handlers return these for every expected
/// failure; nothing here is a panic path.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn missing_body() -> Self {
        Self::BadRequest("A request body is required.".to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::NotFound("User not found.".to_string()),
            DomainError::Validation { errors } => Self::Validation(errors),
            DomainError::Storage { message } => {
                tracing::error!(error = %message, "storage failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(status = status.as_u16(), error = %self, "request failed");

        let body = match self {
            ApiError::Validation(errors) => json!({ "errors": errors.into_inner() }),
            ApiError::Internal => json!({ "error": "An unexpected error occurred." }),
            ApiError::BadRequest(message) | ApiError::NotFound(message) => {
                json!({ "error": message })
            }
        };
        (status, Json(body)).into_response()
    }
}
