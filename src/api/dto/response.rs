//! The envelope every endpoint answers with.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{description, statusCode, data}`, for successes and failures alike.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = "tweet created")]
    pub description: String,
    #[serde(rename = "statusCode")]
    #[schema(example = 201)]
    pub status_code: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, description: impl Into<String>, data: T) -> Self {
        Self {
            description: description.into(),
            status_code: status.as_u16(),
            data,
        }
    }

    /// 200 OK
    pub fn ok(description: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, description, data)
    }

    /// 201 Created
    pub fn created(description: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, description, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
