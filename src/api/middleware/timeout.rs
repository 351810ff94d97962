//! Per-request time budget.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// Abandons the request after `budget` and answers 408 in the standard
/// envelope. Nothing is retried.
pub async fn timeout_middleware(
    State(budget): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(budget_secs = budget.as_secs(), "Request timed out");
            AppError::Timeout {
                seconds: budget.as_secs(),
            }
            .into_response()
        }
    }
}
