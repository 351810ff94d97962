//! User endpoints.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    ApiResponse, CreateUserRequest, ListQuery, UpdatePasswordRequest, UpdateUserRequest,
    UserResponse, UsersResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_id};

pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user))
        .routes(routes!(get_user))
        .routes(routes!(list_users))
        .routes(routes!(update_user))
        .routes(routes!(delete_user))
        .routes(routes!(update_password))
}

#[utoipa::path(
    post,
    path = "/user",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid body", body = ApiResponse<String>),
        (status = 409, description = "Username taken", body = ApiResponse<String>)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.create_user(req.into_create_user()).await?;
    Ok(ApiResponse::created("user created", user.into()))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 400, description = "Malformed id", body = ApiResponse<String>),
        (status = 404, description = "No such user, or user deleted", body = ApiResponse<String>)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.get_user(parse_id("id", &id)?).await?;
    Ok(ApiResponse::ok("user", user.into()))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of users, newest first", body = ApiResponse<UsersResponse>),
        (status = 400, description = "Invalid query", body = ApiResponse<String>)
    )
)]
async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<UsersResponse>> {
    let page = state.services.users.list_users(query.into_list_params()).await?;
    Ok(ApiResponse::ok("users", page.into()))
}

#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid body or id", body = ApiResponse<String>),
        (status = 404, description = "No such user", body = ApiResponse<String>)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let id = parse_id("id", &id)?;
    let user = state
        .services
        .users
        .update_user(id, req.into_update_user())
        .await?;
    Ok(ApiResponse::ok("user updated", user.into()))
}

/// Soft delete: the user disappears from every read but the username stays reserved.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<Uuid>),
        (status = 404, description = "No such user", body = ApiResponse<String>)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state.services.users.delete_user(id).await?;
    Ok(ApiResponse::ok("user deleted", id))
}

#[utoipa::path(
    patch,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<Uuid>),
        (status = 400, description = "Wrong old password or weak new password", body = ApiResponse<String>),
        (status = 404, description = "No such user", body = ApiResponse<String>)
    )
)]
async fn update_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state
        .services
        .users
        .update_password(id, &req.old_password, &req.new_password)
        .await?;
    Ok(ApiResponse::ok("password updated", id))
}
