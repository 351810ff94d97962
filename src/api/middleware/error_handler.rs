//! HTTP mapping for `AppError`.
//!
//! Every error answers with the standard envelope: the status reason as
//! `description` and the full error text, sources included, as `data`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::dto::ApiResponse;
use crate::error::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::ValidationErrors { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %detail, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %detail, "Request rejected");
        }

        let description = status.canonical_reason().unwrap_or("Error");
        ApiResponse::new(status, description, detail).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404_envelope() {
        let (status, body) = body_of(AppError::not_found("user", "id", "42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["description"], "Not Found");
        assert_eq!(body["data"], "Resource not found: user with id=42");
    }

    #[tokio::test]
    async fn duplicate_is_conflict() {
        let (status, body) = body_of(AppError::duplicate("users", "username", "alice")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["statusCode"], 409);
    }

    #[tokio::test]
    async fn database_error_exposes_source_chain() {
        let error = AppError::Database {
            operation: "insert tweet".to_string(),
            source: anyhow::anyhow!("connection reset"),
        };
        let (status, body) = body_of(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["data"],
            "Database operation failed: insert tweet: connection reset"
        );
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (AppError::validation("id", "bad"), StatusCode::BAD_REQUEST),
            (
                AppError::BadRequest { message: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Unauthorized { message: "x".into() },
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Timeout { seconds: 5 }, StatusCode::REQUEST_TIMEOUT),
            (
                AppError::not_found("tweet", "id", "t1"),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Database {
                    operation: "insert tweet".into(),
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::ConnectionPool { source: anyhow::anyhow!("down") },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }
}
