//! Shared state handed to every handler through axum's `State` extractor.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Cloning is cheap: services hold `Arc`s and the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub settings: Arc<Settings>,
    /// Used by the readiness probe. `None` when services are not database backed.
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Wires Postgres repositories and services over `pool`.
    pub fn new(pool: AsyncDbPool, settings: Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        Self {
            services: Services::new(repos),
            settings: Arc::new(settings),
            db_pool: Some(pool),
        }
    }

    pub fn from_repositories(repos: Repositories, settings: Settings) -> Self {
        Self {
            services: Services::new(repos),
            settings: Arc::new(settings),
            db_pool: None,
        }
    }
}
