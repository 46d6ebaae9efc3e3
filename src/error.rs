//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Too many withdrawal attempts, try later.")]
    RateLimited,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::Domain(domain_err) => match domain_err {
                // 400 Bad Request
                DomainError::InvalidPayload | DomainError::InsufficientFunds { .. } => {
                    (StatusCode::BAD_REQUEST, None)
                }

                // 404 Not Found
                DomainError::UserNotFound(_) => (StatusCode::NOT_FOUND, None),

                // 500 Internal Server Error
                DomainError::ProviderTransferFailed { details } => {
                    tracing::error!(details = %details, "Provider transfer failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, Some(details.clone()))
                }
            },

            // 429 Too Many Requests
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, None),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_payload_response() {
        let (status, body) = render(DomainError::InvalidPayload.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid payload"}));
    }

    #[tokio::test]
    async fn test_user_not_found_response() {
        let (status, body) = render(DomainError::UserNotFound("ghost".into()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_insufficient_funds_response() {
        let (status, body) = render(DomainError::insufficient_funds(10.0, 5.0).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Insufficient balance");
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let (status, body) = render(AppError::RateLimited).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body,
            json!({"error": "Too many withdrawal attempts, try later."})
        );
    }

    #[tokio::test]
    async fn test_provider_failure_carries_details() {
        let err = DomainError::ProviderTransferFailed {
            details: json!({"message": "Insufficient provider balance"}),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Withdrawal failed");
        assert_eq!(body["details"]["message"], "Insufficient provider balance");
    }
}
