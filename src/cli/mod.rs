//! Command line interface: parsing, configuration merging and dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, EnvironmentArg, LogLevel};

use crate::config::{Environment, Settings};
use crate::logger::init_logger;

/// Loads configuration for `cli`, applies its overrides and validates the result.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, Environment)> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    let settings = merger.merge_cli_args(cli)?;
    Ok((settings, merger.environment()))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let config = settings.logger.clone().into_logger_config()?;
    init_logger(config)
}
