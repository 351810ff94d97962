//! Login endpoint.

use axum::extract::State;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ApiResponse, LoginRequest, UserResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(login))
}

/// Checks a username/password pair and returns the matching user.
///
/// Unknown users, deleted users and wrong passwords all answer 401 with the
/// same message.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = ApiResponse<UserResponse>),
        (status = 400, description = "Missing username or password", body = ApiResponse<String>),
        (status = 401, description = "Invalid credentials", body = ApiResponse<String>)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state
        .services
        .users
        .authenticate(&req.username, &req.password)
        .await?;
    Ok(ApiResponse::ok("login successful", user.into()))
}
