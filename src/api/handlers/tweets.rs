//! Tweet endpoints.

use axum::extract::{Path, State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::TWEET_TAG;
use crate::api::dto::{
    ApiResponse, CreateTweetRequest, ListQuery, TweetResponse, TweetsResponse,
    UpdateTweetRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery, parse_id};

pub fn tweet_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_tweet))
        .routes(routes!(get_tweet))
        .routes(routes!(list_tweets))
        .routes(routes!(update_tweet))
        .routes(routes!(delete_tweet))
}

#[utoipa::path(
    post,
    path = "/tweet",
    tag = TWEET_TAG,
    request_body = CreateTweetRequest,
    responses(
        (status = 201, description = "Tweet created", body = ApiResponse<TweetResponse>),
        (status = 400, description = "Invalid body", body = ApiResponse<String>)
    )
)]
async fn create_tweet(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTweetRequest>,
) -> AppResult<ApiResponse<TweetResponse>> {
    let tweet = state.services.tweets.create(req.into_new_tweet()).await?;
    Ok(ApiResponse::created("tweet created", tweet.into()))
}

#[utoipa::path(
    get,
    path = "/tweet/{id}",
    tag = TWEET_TAG,
    params(("id" = Uuid, Path, description = "Tweet id")),
    responses(
        (status = 200, description = "Tweet found", body = ApiResponse<TweetResponse>),
        (status = 404, description = "No such tweet", body = ApiResponse<String>)
    )
)]
async fn get_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TweetResponse>> {
    let tweet = state.services.tweets.get(parse_id("id", &id)?).await?;
    Ok(ApiResponse::ok("tweet", tweet.into()))
}

/// `search` matches content; `user_id` lists one author's tweets.
#[utoipa::path(
    get,
    path = "/tweets",
    tag = TWEET_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of tweets, newest first", body = ApiResponse<TweetsResponse>),
        (status = 400, description = "Invalid query", body = ApiResponse<String>)
    )
)]
async fn list_tweets(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> AppResult<ApiResponse<TweetsResponse>> {
    let page = state.services.tweets.list(query.into_list_params()).await?;
    Ok(ApiResponse::ok("tweets", page.into()))
}

#[utoipa::path(
    put,
    path = "/tweet/{id}",
    tag = TWEET_TAG,
    params(("id" = Uuid, Path, description = "Tweet id")),
    request_body = UpdateTweetRequest,
    responses(
        (status = 200, description = "Tweet updated", body = ApiResponse<TweetResponse>),
        (status = 404, description = "No such tweet", body = ApiResponse<String>)
    )
)]
async fn update_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTweetRequest>,
) -> AppResult<ApiResponse<TweetResponse>> {
    let id = parse_id("id", &id)?;
    let tweet = state
        .services
        .tweets
        .update(id, req.into_update_tweet())
        .await?;
    Ok(ApiResponse::ok("tweet updated", tweet.into()))
}

#[utoipa::path(
    delete,
    path = "/tweet/{id}",
    tag = TWEET_TAG,
    params(("id" = Uuid, Path, description = "Tweet id")),
    responses(
        (status = 200, description = "Tweet deleted with its likes and retweets", body = ApiResponse<Uuid>),
        (status = 404, description = "No such tweet", body = ApiResponse<String>)
    )
)]
async fn delete_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Uuid>> {
    let id = parse_id("id", &id)?;
    state.services.tweets.delete(id).await?;
    Ok(ApiResponse::ok("tweet deleted", id))
}
