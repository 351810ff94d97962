//! Follower endpoints.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::FOLLOWER_TAG;
use crate::api::dto::{
    ApiResponse, CreateFollowerRequest, FollowerResponse, FollowersResponse, ListQuery,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_id};

pub fn follower_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_follower))
        .routes(routes!(get_follower))
        .routes(routes!(list_followers))
        .routes(routes!(delete_follower))
}

#[utoipa::path(
    post,
    path = "/follower",
    tag = FOLLOWER_TAG,
    request_body = CreateFollowerRequest,
    responses(
        (status = 201, description = "Follow created", body = ApiResponse<FollowerResponse>),
        (status = 400, description = "Invalid body or self-follow", body = ApiResponse<String>),
        (status = 409, description = "Already following", body = ApiResponse<String>)
    )
)]
async fn create_follower(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFollowerRequest>,
) -> AppResult<ApiResponse<FollowerResponse>> {
    let follower = state.services.followers.create(req.into()).await?;
    Ok(ApiResponse::created("follower created", follower.into()))
}

#[utoipa::path(
    get,
    path = "/follower/{id}",
    tag = FOLLOWER_TAG,
    params(("id" = Uuid, Path, description = "Follow relationship id")),
    responses(
        (status = 200, description = "Follow found", body = ApiResponse<FollowerResponse>),
        (status = 404, description = "No such follow", body = ApiResponse<String>)
    )
)]
async fn get_follower(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FollowerResponse>> {
    let follower = state.services.followers.get(parse_id("id", &id)?).await?;
    Ok(ApiResponse::ok("follower", follower.into()))
}

/// `user_id` lists the followers of one user.
#[utoipa::path(
    get,
    path = "/followers",
    tag = FOLLOWER_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of follows, newest first", body = ApiResponse<FollowersResponse>)
    )
)]
async fn list_followers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<FollowersResponse>> {
    let page = state.services.followers.list(query.into_list_params()).await?;
    Ok(ApiResponse::ok("followers", page.into()))
}

#[utoipa::path(
    delete,
    path = "/follower/{id}",
    tag = FOLLOWER_TAG,
    params(("id" = Uuid, Path, description = "Follow relationship id")),
    responses(
        (status = 200, description = "Unfollowed", body = ApiResponse<Uuid>),
        (status = 404, description = "No such follow", body = ApiResponse<String>)
    )
)]
async fn delete_follower(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state.services.followers.delete(id).await?;
    Ok(ApiResponse::ok("follower deleted", id))
}
