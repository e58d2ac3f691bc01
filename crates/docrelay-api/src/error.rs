use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use docrelay_persist::StoreError;
use docrelay_provider::ProviderError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-supplied data failed validation (empty message, missing
    /// file). Rejected before any store or provider call.
    #[error("{0}")]
    InvalidInput(String),

    /// Referenced session does not exist or belongs to someone else;
    /// the two cases are deliberately indistinguishable.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthenticated(String),

    /// The provider rejected or failed the file registration.
    #[error("Error registering file with provider: {0}")]
    UpstreamRegistration(#[source] ProviderError),

    /// The provider failed the chat call after the retry policy ran
    /// its course.
    #[error("Error communicating with provider: {0}")]
    UpstreamChat(#[source] ProviderError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("An unexpected error occurred")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::UpstreamRegistration(ref e) | ApiError::UpstreamChat(ref e) => {
                tracing::error!("Provider error: {}", e);
                // The upstream message is surfaced for diagnostics.
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Store(ref e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::Internal => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
