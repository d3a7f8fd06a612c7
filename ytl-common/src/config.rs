//! Configuration file discovery and bootstrap TOML loading
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Per-user config directory (`<config_dir>/ytl/<file_name>`)
//! 4. Built-in defaults (no file)

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under the platform config dir that holds ytl config files
pub const CONFIG_DIR_NAME: &str = "ytl";

/// Where a config file was resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Named explicitly by CLI argument or environment variable; must exist
    Explicit(PathBuf),
    /// Platform default location; may be absent
    Default(PathBuf),
    /// No location could be determined, use built-in defaults
    BuiltIn,
}

impl ConfigLocation {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigLocation::Explicit(p) | ConfigLocation::Default(p) => Some(p),
            ConfigLocation::BuiltIn => None,
        }
    }
}

/// Logging section shared by every ytl config file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve the config file location
///
/// `cli_arg` wins over `env_var_name`, which wins over the platform default
/// `<config_dir>/ytl/<file_name>`.
pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    file_name: &str,
) -> ConfigLocation {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigLocation::Explicit(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return ConfigLocation::Explicit(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    match dirs::config_dir() {
        Some(dir) => ConfigLocation::Default(dir.join(CONFIG_DIR_NAME).join(file_name)),
        None => ConfigLocation::BuiltIn,
    }
}

/// Load a TOML config from the resolved location
///
/// A missing file at the default location yields `T::default()`; a missing
/// or unparsable explicit file is a configuration error.
pub fn load_toml_config<T>(location: &ConfigLocation) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = match location {
        ConfigLocation::BuiltIn => {
            debug!("No config location available, using built-in defaults");
            return Ok(T::default());
        }
        ConfigLocation::Default(path) if !path.exists() => {
            debug!("No config file at {}, using built-in defaults", path.display());
            return Ok(T::default());
        }
        ConfigLocation::Explicit(path) | ConfigLocation::Default(path) => path,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parse TOML text into a config struct
pub fn parse_toml_config<T: DeserializeOwned>(content: &str) -> std::result::Result<T, toml::de::Error> {
    toml::from_str(content)
}
