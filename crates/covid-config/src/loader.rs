//! Configuration loading utilities

use crate::schema::Config;
use covid_common::{CovidError, Result as CovidResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "COVID_CHARTS_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "covid-charts.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Defaults could not be laid out as TOML for merging
    #[error("Failed to serialize default configuration: {0}")]
    Defaults(#[from] toml::ser::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for CovidError {
    fn from(err: ConfigError) -> Self {
        CovidError::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file without overrides or validation.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse `content` laid over [`Config::default`]. Tables are merged key
    /// by key, so a partial `[charts.deaths]` keeps the deaths defaults for
    /// whatever it leaves out. Arrays and scalars replace the default.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        let overlay: toml::Table = toml::from_str(content)?;
        let mut merged = match toml::Value::try_from(Config::default())? {
            toml::Value::Table(table) => table,
            _ => toml::Table::new(),
        };
        merge_tables(&mut merged, overlay);
        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// Resolve, load, override from the environment and validate.
    pub fn load() -> CovidResult<Config> {
        let mut config = match Self::resolve_path() {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading configuration file");
                Self::load_config(&path)?
            }
            None => {
                tracing::info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a specific file, apply environment overrides and validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CovidResult<Config> {
        let mut config = Self::load_config(path)?;
        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn resolve_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        local.exists().then(|| local.to_path_buf())
    }

    /// Apply overrides looked up through `lookup` (normally the process
    /// environment).
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("COVID_DATA_ROOT") {
            config.data.repo_location = PathBuf::from(root);
        }

        if let Some(dir) = lookup("COVID_OUTPUT_DIR") {
            config.charts.output_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup("COVID_MIN_DATA_LEN") {
            config.alignment.min_data_len = parse_var("COVID_MIN_DATA_LEN", &value)?;
        }

        if let Some(value) = lookup("COVID_MAX_DATA_LEN") {
            config.alignment.max_data_len = parse_var("COVID_MAX_DATA_LEN", &value)?;
        }

        if let Some(regions) = lookup("COVID_EXCLUDED_REGIONS") {
            config.alignment.excluded_regions = regions
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(level) = lookup("COVID_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(table) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, table);
                    continue;
                }
                base.insert(key, toml::Value::Table(table));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
