//! Liveness and readiness probes.
//!
//! Readiness talks to the pool directly instead of going through a service so
//! it measures connectivity and nothing else.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ApiResponse, ComponentHealth, HealthResponse, HealthStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(liveness))
        .routes(routes!(readiness))
}

/// Answers as long as the process can serve requests.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses((status = 200, description = "Process is alive", body = ApiResponse<HealthResponse>))
)]
async fn liveness() -> ApiResponse<HealthResponse> {
    ApiResponse::ok("alive", health_response(HealthStatus::Healthy, None))
}

/// 503 when the database cannot run `SELECT 1`.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Ready to serve traffic", body = ApiResponse<HealthResponse>),
        (status = 503, description = "Database unreachable", body = ApiResponse<HealthResponse>)
    )
)]
async fn readiness(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let database = match state.db_pool {
        Some(ref pool) => Some(check_database(pool).await),
        None => None,
    };

    let status = match database {
        Some(ComponentHealth {
            status: HealthStatus::Unhealthy,
            ..
        }) => HealthStatus::Unhealthy,
        _ => HealthStatus::Healthy,
    };

    match status {
        HealthStatus::Healthy => ApiResponse::ok("ready", health_response(status, database)),
        HealthStatus::Unhealthy => {
            tracing::warn!("Readiness check failed");
            ApiResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "not ready",
                health_response(status, database),
            )
        }
    }
}

fn health_response(status: HealthStatus, database: Option<ComponentHealth>) -> HealthResponse {
    HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now(),
        database,
    }
}

async fn check_database(pool: &AsyncDbPool) -> ComponentHealth {
    let started = Instant::now();
    let elapsed = || started.elapsed().as_millis() as u64;

    let mut conn = match pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            return ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: format!("Connection failed: {e}"),
                response_time_ms: elapsed(),
            };
        }
    };

    match diesel::sql_query("SELECT 1").execute(&mut conn).await {
        Ok(_) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: "Connected".to_string(),
            response_time_ms: elapsed(),
        },
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: format!("Query failed: {e}"),
            response_time_ms: elapsed(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn liveness_is_always_healthy() {
        let response = liveness().await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.data.status, HealthStatus::Healthy);
        assert!(response.data.database.is_none());
    }

    #[test]
    fn health_response_carries_crate_version() {
        let response = health_response(HealthStatus::Healthy, None);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
