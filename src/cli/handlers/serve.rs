//! `serve`: validate configuration, then run the HTTP server.

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Runs the server until shutdown, or only reports the configuration
    /// when `dry_run` is set.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        self.config.validate()?;

        if dry_run {
            self.report();
            return Ok(());
        }

        Server::new(self.config, self.environment).run().await
    }

    fn report(&self) {
        println!("✓ Configuration is valid ({} environment)", self.environment);
        println!("✓ Server would bind to {}", self.config.server.address());
        println!(
            "✓ Requests time out after {}s",
            self.config.server.request_timeout
        );
        println!(
            "✓ Database pool: {}..{} connections, auto_migrate={}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!("✓ Log level: {}", self.config.logger.level);
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
