//! Dispatches a parsed command line to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};

const PRIVILEGED_PORT_LIMIT: u16 = 1024;

/// Runs the selected subcommand; no subcommand means `serve`.
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    environment: Environment,
) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(dry_run, rollback)
                .await?;
            Ok(())
        }
        Some(Commands::Serve { dry_run, .. }) => serve(settings, environment, dry_run).await,
        None => serve(settings, environment, false).await,
    }
}

async fn serve(settings: Settings, environment: Environment, dry_run: bool) -> anyhow::Result<()> {
    if settings.server.port < PRIVILEGED_PORT_LIMIT {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a port below 1024 usually requires elevated privileges"
        );
    }
    ServeCommandHandler::new(settings, environment)
        .execute(dry_run)
        .await
}
