//! Response envelope and error mapping for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use product_search_repository::SearchIndexError;
use product_search_shared::{FieldError, PageMeta};

/// Detail sent to clients for any backend failure; the cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "the search backend failed to process the request";

/// Envelope for successful responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying page metadata.
    pub fn paginated(message: impl Into<String>, data: T, pagination: PageMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            pagination: Some(pagination),
        }
    }
}

/// Envelope for failed responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse<E> {
    pub success: bool,
    pub message: String,
    pub error: E,
}

impl<E> ErrorResponse<E> {
    pub fn new(message: impl Into<String>, error: E) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request parameters failed validation (422).
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// The search backend failed (500). The message is logged, never returned.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        Self::Validation(vec![err])
    }
}

impl From<SearchIndexError> for ApiError {
    fn from(err: SearchIndexError) -> Self {
        match err {
            SearchIndexError::ValidationError(message) => {
                Self::Validation(vec![FieldError::new("request", message)])
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("Validation failed", errors)),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error", INTERNAL_ERROR_DETAIL)),
                )
                    .into_response()
            }
        }
    }
}
