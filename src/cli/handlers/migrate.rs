//! `migrate`: apply, preview or revert the embedded migrations.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            match pending_migrations(url).await? {
                0 => println!("✓ No pending migrations, database is up to date"),
                n => println!("{n} pending migration(s); run without --dry-run to apply"),
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = revert_migrations(url, steps as usize).await?;
            tracing::info!(count = reverted.len(), "Migrations reverted");
            println!("✓ Reverted {} migration(s):", reverted.len());
            for version in &reverted {
                println!("  - {version}");
            }
            return Ok(());
        }

        let applied = run_pending_migrations(url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No migrations to apply, database is up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {version}");
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn missing_database_url_fails_before_connecting() {
        let handler = MigrateCommandHandler::new(Settings::default());
        assert!(handler.config().database.url.is_empty());

        let result = handler.execute(false, None).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn zero_rollback_steps_is_a_validation_error() {
        let mut config = Settings::default();
        config.database.url = "postgres://nobody@127.0.0.1:1/flock".to_string();

        let result = MigrateCommandHandler::new(config).execute(false, Some(0)).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
