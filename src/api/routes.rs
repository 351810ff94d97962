//! Router assembly: resource routes, OpenAPI document and middleware stack.

use axum::http::Uri;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware, timeout_middleware};
use crate::error::AppError;
use crate::state::AppState;

/// Builds the application router.
///
/// Layers run outermost first: CORS, request id, logging, timeout. Logging
/// therefore sees the request id and also records requests that time out.
pub fn create_router(state: AppState) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::users::user_routes())
        .merge(handlers::tweets::tweet_routes())
        .merge(handlers::likes::like_routes())
        .merge(handlers::followers::follower_routes())
        .merge(handlers::retweets::retweet_routes())
        .merge(handlers::auth::auth_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let request_timeout = state.settings.server.request_timeout();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            request_timeout,
            timeout_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found("route", "path", uri.path())
}
