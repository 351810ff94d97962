//! Like endpoints.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::LIKE_TAG;
use crate::api::dto::{ApiResponse, CreateLikeRequest, LikeResponse, LikesResponse, ListQuery};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_id};

pub fn like_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_like))
        .routes(routes!(get_like))
        .routes(routes!(delete_like))
        .routes(routes!(list_likes))
        .routes(routes!(list_tweet_likes))
}

#[utoipa::path(
    post,
    path = "/like",
    tag = LIKE_TAG,
    request_body = CreateLikeRequest,
    responses(
        (status = 201, description = "Like recorded", body = ApiResponse<LikeResponse>),
        (status = 400, description = "Invalid body", body = ApiResponse<String>),
        (status = 409, description = "User already liked this tweet", body = ApiResponse<String>)
    )
)]
async fn create_like(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateLikeRequest>,
) -> AppResult<ApiResponse<LikeResponse>> {
    let like = state.services.likes.create(req.into()).await?;
    Ok(ApiResponse::created("like created", like.into()))
}

#[utoipa::path(
    get,
    path = "/like/{id}",
    tag = LIKE_TAG,
    params(("id" = Uuid, Path, description = "Like id")),
    responses(
        (status = 200, description = "Like found", body = ApiResponse<LikeResponse>),
        (status = 404, description = "No such like", body = ApiResponse<String>)
    )
)]
async fn get_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LikeResponse>> {
    let like = state.services.likes.get(parse_id("id", &id)?).await?;
    Ok(ApiResponse::ok("like", like.into()))
}

#[utoipa::path(
    delete,
    path = "/like/{id}",
    tag = LIKE_TAG,
    params(("id" = Uuid, Path, description = "Like id")),
    responses(
        (status = 200, description = "Like removed", body = ApiResponse<Uuid>),
        (status = 404, description = "No such like", body = ApiResponse<String>)
    )
)]
async fn delete_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state.services.likes.delete(id).await?;
    Ok(ApiResponse::ok("like deleted", id))
}

/// Filters: `tweet_id`, `user_id`.
#[utoipa::path(
    get,
    path = "/likes",
    tag = LIKE_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of likes, newest first", body = ApiResponse<LikesResponse>)
    )
)]
async fn list_likes(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<LikesResponse>> {
    let page = state.services.likes.list(query.into_list_params()).await?;
    Ok(ApiResponse::ok("likes", page.into()))
}

#[utoipa::path(
    get,
    path = "/likes/{tweet_id}",
    tag = LIKE_TAG,
    params(
        ("tweet_id" = Uuid, Path, description = "Tweet id"),
        ListQuery
    ),
    responses(
        (status = 200, description = "Likes of one tweet", body = ApiResponse<LikesResponse>),
        (status = 400, description = "Malformed tweet id", body = ApiResponse<String>)
    )
)]
async fn list_tweet_likes(
    State(state): State<AppState>,
    Path(tweet_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<LikesResponse>> {
    let tweet_id = parse_id("tweet_id", &tweet_id)?;
    let params = query.into_list_params().with_tweet_id(tweet_id);
    let page = state.services.likes.list(params).await?;
    Ok(ApiResponse::ok("likes", page.into()))
}
