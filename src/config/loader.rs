//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional, not committed)
//! 4. `FLOCK_*` environment variables, `__` separating nested keys
//!
//! `FLOCK_CONFIG_FILE` replaces steps 1-3 with a single file.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "FLOCK_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "FLOCK_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "FLOCK";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
    env_prefix: String,
}

impl ConfigLoader {
    /// Builds a loader from `FLOCK_CONFIG_DIR`, `FLOCK_CONFIG_FILE` and `FLOCK_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both `FLOCK_CONFIG_DIR` and `FLOCK_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_sources(
            std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from),
            std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from),
            AppEnvironment::from_env(),
        )
    }

    fn from_sources(
        config_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
        environment: AppEnvironment,
    ) -> Result<Self, ConfigError> {
        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{CONFIG_DIR_ENV} and {CONFIG_FILE_ENV} cannot both be set. \
                 Use {CONFIG_DIR_ENV} for layered configuration or \
                 {CONFIG_FILE_ENV} for a single configuration file."
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment,
            env_prefix: ENV_PREFIX.to_string(),
        })
    }

    /// Layered loader over `dir` for the given environment.
    pub fn from_dir(dir: impl Into<PathBuf>, environment: AppEnvironment) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            environment,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Replaces layered loading with a single file.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Prefix of the environment variables that override file values.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads and validates the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the settings without validating them, so that command line
    /// overrides can be applied first.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref file) => add_file_source(builder, file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        // FLOCK_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let env_file = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_file, false)?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DEFAULT_TOML: &str = r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout = 5

[database]
url = "postgres://localhost/flock"
max_connections = 10
min_connections = 1

[logger]
level = "info"
"#;

    fn config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn loader(dir: &TempDir, environment: AppEnvironment, prefix: &str) -> ConfigLoader {
        ConfigLoader::from_dir(dir.path(), environment).with_env_prefix(prefix)
    }

    #[test]
    fn defaults_to_config_directory() {
        let loader = ConfigLoader::from_sources(None, None, AppEnvironment::Development).unwrap();
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.env_prefix, "FLOCK");
    }

    #[test]
    fn dir_and_file_are_mutually_exclusive() {
        let result = ConfigLoader::from_sources(
            Some(PathBuf::from("/etc/flock")),
            Some(PathBuf::from("/etc/flock/app.toml")),
            AppEnvironment::Production,
        );

        match result {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("FLOCK_CONFIG_DIR"));
                assert!(msg.contains("FLOCK_CONFIG_FILE"));
            }
            other => panic!("expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn missing_default_toml_is_an_error() {
        let dir = config_dir(&[]);
        let result = loader(&dir, AppEnvironment::Development, "FLOCKTEST_MISSING").load();

        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn loads_default_toml() {
        let dir = config_dir(&[("default.toml", DEFAULT_TOML)]);
        let settings = loader(&dir, AppEnvironment::Development, "FLOCKTEST_DEFAULT")
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.request_timeout, 5);
        assert_eq!(settings.database.url, "postgres://localhost/flock");
        assert_eq!(settings.application.name, "flock-rs");
    }

    #[test]
    fn environment_file_then_local_file_override_defaults() {
        let dir = config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("production.toml", "[server]\nport = 9000\nhost = \"0.0.0.0\"\n"),
            ("local.toml", "[server]\nport = 9100\n"),
            ("test.toml", "[server]\nport = 1234\n"),
        ]);
        let settings = loader(&dir, AppEnvironment::Production, "FLOCKTEST_LAYERS")
            .load()
            .unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9100);
    }

    #[test]
    fn environment_variables_have_highest_priority() {
        let dir = config_dir(&[("default.toml", DEFAULT_TOML)]);
        // Prefix is unique to this test, so no other test observes it.
        unsafe {
            std::env::set_var("FLOCKTEST_ENVVAR_SERVER__PORT", "7070");
            std::env::set_var("FLOCKTEST_ENVVAR_LOGGER__LEVEL", "debug");
        }

        let settings = loader(&dir, AppEnvironment::Development, "FLOCKTEST_ENVVAR").load();

        unsafe {
            std::env::remove_var("FLOCKTEST_ENVVAR_SERVER__PORT");
            std::env::remove_var("FLOCKTEST_ENVVAR_LOGGER__LEVEL");
        }

        let settings = settings.unwrap();
        assert_eq!(settings.server.port, 7070);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn single_file_mode_skips_layers() {
        let dir = config_dir(&[
            ("default.toml", "[server]\nport = 1\n"),
            ("custom.toml", DEFAULT_TOML),
        ]);
        let settings = loader(&dir, AppEnvironment::Development, "FLOCKTEST_SINGLE")
            .with_config_file(dir.path().join("custom.toml"))
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn load_validates_but_load_unvalidated_does_not() {
        let dir = config_dir(&[("default.toml", "[server]\nport = 0\n")]);
        let loader = loader(&dir, AppEnvironment::Development, "FLOCKTEST_INVALID");

        assert!(matches!(
            loader.load(),
            Err(ConfigError::ValidationError { .. })
        ));
        assert_eq!(loader.load_unvalidated().unwrap().server.port, 0);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = config_dir(&[("default.toml", "[server\nport = ")]);
        let result = loader(&dir, AppEnvironment::Development, "FLOCKTEST_MALFORMED").load();
        assert!(matches!(result, Err(ConfigError::Other(_))));
    }
}
