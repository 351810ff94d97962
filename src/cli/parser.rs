//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Environment;

/// Micro-blogging REST API server
#[derive(Parser, Debug)]
#[command(name = "flock-rs")]
#[command(about = "Micro-blogging REST API: users, tweets, likes, followers and retweets")]
#[command(long_about = "
flock-rs serves a JSON REST API for users, tweets, likes, follow
relationships and retweets, backed by PostgreSQL.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    flock-rs serve

    # Bind to every interface on port 9000
    flock-rs serve --host 0.0.0.0 --port 9000

    # Use a single configuration file and the production layer
    flock-rs --config /etc/flock/flock.toml --env production serve

    # Check the configuration without starting
    flock-rs serve --dry-run

    # Apply, preview or revert schema migrations
    flock-rs migrate
    flock-rs migrate --dry-run
    flock-rs migrate --rollback 1
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to run; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single TOML configuration file replacing the layered `config/` directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment layer to load, overriding FLOCK_APP_ENV
    #[arg(short, long, value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, e.g. 127.0.0.1 or 0.0.0.0
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// TCP port to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level for this run; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate the configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply, preview or revert database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Revert this many of the most recent migrations (1-100)
        #[arg(long, value_name = "STEPS", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentArg {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(env: EnvironmentArg) -> Self {
        match env {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Test => Environment::Test,
            EnvironmentArg::Staging => Environment::Staging,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_and_version_short_circuit() {
        let err = Cli::try_parse_from(["flock-rs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["flock-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn no_arguments_means_serve_with_defaults() {
        let cli = Cli::try_parse_from(["flock-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
        assert!(!cli.verbose && !cli.quiet);
    }

    #[test]
    fn serve_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "flock-rs", "serve", "--host", "0.0.0.0", "--port", "9000", "--log-level", "warning",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(9000),
                log_level: Some(LogLevel::Warn),
                dry_run: false,
            })
        );
    }

    #[test]
    fn environment_aliases_map_to_config_environment() {
        let cli = Cli::try_parse_from(["flock-rs", "--env", "prod"]).unwrap();
        assert_eq!(cli.env.map(Environment::from), Some(Environment::Production));
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let err = Cli::try_parse_from(["flock-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err =
            Cli::try_parse_from(["flock-rs", "migrate", "--dry-run", "--rollback", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Cli::try_parse_from(["flock-rs", "serve", "--port", "0"]).is_err());
        assert!(Cli::try_parse_from(["flock-rs", "migrate", "--rollback", "0"]).is_err());
        assert!(Cli::try_parse_from(["flock-rs", "--config", "/no/such/flock.toml"]).is_err());
    }
}
