//! Retweet endpoints.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::RETWEET_TAG;
use crate::api::dto::{
    ApiResponse, CreateRetweetRequest, ListQuery, RetweetResponse, RetweetsResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_id};

pub fn retweet_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_retweet))
        .routes(routes!(get_retweet))
        .routes(routes!(list_retweets))
        .routes(routes!(delete_retweet))
}

/// Answers with the new retweet id only.
#[utoipa::path(
    post,
    path = "/retweet",
    tag = RETWEET_TAG,
    request_body = CreateRetweetRequest,
    responses(
        (status = 201, description = "Retweet created", body = ApiResponse<Uuid>),
        (status = 400, description = "Invalid body", body = ApiResponse<String>)
    )
)]
async fn create_retweet(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRetweetRequest>,
) -> AppResult<ApiResponse<Uuid>> {
    let retweet = state.services.retweets.create(req.into()).await?;
    Ok(ApiResponse::created("retweet created", retweet.retweet_id))
}

#[utoipa::path(
    get,
    path = "/retweet/{id}",
    tag = RETWEET_TAG,
    params(("id" = Uuid, Path, description = "Retweet id")),
    responses(
        (status = 200, description = "Retweet found", body = ApiResponse<RetweetResponse>),
        (status = 404, description = "No such retweet", body = ApiResponse<String>)
    )
)]
async fn get_retweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<RetweetResponse>> {
    let retweet = state.services.retweets.get(parse_id("id", &id)?).await?;
    Ok(ApiResponse::ok("retweet", retweet.into()))
}

/// Filters: `user_id` (who retweeted), `tweet_id` (original tweet).
#[utoipa::path(
    get,
    path = "/retweets",
    tag = RETWEET_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of retweets, newest first", body = ApiResponse<RetweetsResponse>)
    )
)]
async fn list_retweets(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<RetweetsResponse>> {
    let page = state.services.retweets.list(query.into_list_params()).await?;
    Ok(ApiResponse::ok("retweets", page.into()))
}

#[utoipa::path(
    delete,
    path = "/retweet/{id}",
    tag = RETWEET_TAG,
    params(("id" = Uuid, Path, description = "Retweet id")),
    responses(
        (status = 200, description = "Retweet deleted", body = ApiResponse<Uuid>),
        (status = 404, description = "No such retweet", body = ApiResponse<String>)
    )
)]
async fn delete_retweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state.services.retweets.delete(id).await?;
    Ok(ApiResponse::ok("retweet deleted", id))
}
