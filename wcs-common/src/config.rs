//! Configuration loading and resolution
//!
//! Bootstrap settings come from a small TOML file. Each value is resolved in
//! priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file at the default location is not an error: the
//! service logs a warning and starts with compiled defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::loader::CatalogSource;
use crate::record::ColumnMap;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WCS_CONFIG";

/// Environment variable naming the wine sheet location
pub const SOURCE_ENV_VAR: &str = "WCS_SOURCE";

pub const DEFAULT_SOURCE: &str = "winelist.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5730;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// File path or http(s) URL of the wine sheet
    pub source: Option<String>,

    /// HTTP bind address
    pub host: String,

    /// HTTP server port
    pub port: u16,

    pub logging: LoggingConfig,

    /// Source header names
    pub columns: ColumnMap,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            source: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            logging: LoggingConfig::default(),
            columns: ColumnMap::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Read and parse a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded TOML configuration from {}", path.display());
        Ok(config)
    }

    /// Load the resolved config file, falling back to defaults
    ///
    /// A path given explicitly (CLI or environment) must exist. The default
    /// location may be absent. A file that exists but fails to parse is
    /// always an error.
    pub fn load_resolved(cli_arg: Option<&Path>) -> Result<Self> {
        Self::load_from(&resolve_config_path(cli_arg))
    }

    pub fn load_from(location: &ConfigLocation) -> Result<Self> {
        match location {
            ConfigLocation::Explicit(path) => Self::load(path),
            ConfigLocation::Default(path) if path.exists() => Self::load(path),
            ConfigLocation::Default(path) => {
                warn!(
                    "No config file at {}, using compiled defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            ConfigLocation::None => {
                warn!("Could not determine config directory, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Where the config file was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// From the command line or [`CONFIG_ENV_VAR`]
    Explicit(PathBuf),
    /// Platform config directory
    Default(PathBuf),
    /// No platform config directory available
    None,
}

/// Resolve the config file path: CLI > environment > platform default
pub fn resolve_config_path(cli_arg: Option<&Path>) -> ConfigLocation {
    if let Some(path) = cli_arg {
        return ConfigLocation::Explicit(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigLocation::Explicit(PathBuf::from(path));
        }
    }

    match default_config_path() {
        Some(path) => ConfigLocation::Default(path),
        None => ConfigLocation::None,
    }
}

/// `<config dir>/wcs/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wcs").join("config.toml"))
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: CatalogSource,
    pub host: String,
    pub port: u16,
    pub logging: LoggingConfig,
    pub columns: ColumnMap,
}

impl Config {
    /// Merge TOML values with overrides and the environment
    pub fn resolve(toml_config: TomlConfig, overrides: ConfigOverrides) -> Self {
        let source = overrides
            .source
            .or_else(|| {
                std::env::var(SOURCE_ENV_VAR)
                    .ok()
                    .filter(|s| !s.trim().is_empty())
            })
            .or(toml_config.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let mut logging = toml_config.logging;
        if let Some(level) = overrides.log_level {
            logging.level = level;
        }

        Config {
            source: CatalogSource::new(&source),
            host: overrides.host.unwrap_or(toml_config.host),
            port: overrides.port.unwrap_or(toml_config.port),
            logging,
            columns: toml_config.columns,
        }
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
