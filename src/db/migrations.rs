//! Embedded schema migrations.
//!
//! `MigrationHarness` is synchronous, so every operation opens a plain
//! `PgConnection` on a blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

/// SQL migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Number of embedded migrations not yet applied.
pub async fn pending_migrations(database_url: &str) -> AppResult<usize> {
    with_connection(database_url, "check pending migrations", |conn| {
        conn.pending_migrations(MIGRATIONS).map(|pending| pending.len())
    })
    .await
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "run pending migrations", |conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.iter().map(ToString::to_string).collect())
    })
    .await
}

/// Reverts the `steps` most recent migrations and returns their versions.
pub async fn revert_migrations(database_url: &str, steps: usize) -> AppResult<Vec<String>> {
    if steps == 0 {
        return Err(AppError::validation(
            "rollback_steps",
            "Number of rollback steps must be greater than 0",
        ));
    }

    let applied = with_connection(database_url, "list applied migrations", |conn| {
        conn.applied_migrations().map(|applied| applied.len())
    })
    .await?;
    if applied < steps {
        return Err(AppError::validation(
            "rollback_steps",
            format!("Cannot rollback {steps} migrations - only {applied} applied"),
        ));
    }

    with_connection(database_url, "revert migrations", move |conn| {
        (0..steps)
            .map(|_| {
                conn.revert_last_migration(MIGRATIONS)
                    .map(|version| version.to_string())
            })
            .collect()
    })
    .await
}

type HarnessResult<T> = diesel::migration::Result<T>;

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> HarnessResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: format!("connect to {operation}"),
            source: anyhow::Error::new(e),
        })?;
        f(&mut conn).map_err(|e| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{e}"),
        })
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?
}
