//! Configuration system for orgtree.
//!
//! orgtree uses TOML configuration files named `.orgtree.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.orgtree.toml` files found, then loading `~/.orgtree.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawFetchSettings, RawLogSettings, RawSessionSettings, RawSourceSettings,
    parse_config_file, parse_config_str,
};
pub use resolve::resolve_source_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for orgtree.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.orgtree.toml` files according to precedence rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// Where chart records come from.
    pub source: SourceSettings,
    /// Search session settings.
    pub session: SessionSettings,
    /// Retry behaviour for data-source calls.
    pub fetch: FetchSettings,
    /// Logging settings.
    pub log: LogSettings,
    /// Directory containing the most specific config file.
    #[serde(skip)]
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.orgtree.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.orgtree.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.orgtree.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML, in the same layout as a `.orgtree.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }
}

/// Where chart records come from.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Resolved path to the JSON dataset, if one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Simulated latency added to every data-source call, in milliseconds.
    pub latency_ms: u64,
}

impl SourceSettings {
    /// The simulated latency as a duration.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Search session settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Identifier of the chart root.
    pub root: String,
    /// Name of the container the chart is drawn into.
    pub container: String,
    /// How long matches stay highlighted, in milliseconds.
    pub highlight_ms: u64,
}

impl SessionSettings {
    /// The highlight-clear delay as a duration.
    pub fn highlight_delay(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            root: String::from("root"),
            container: String::from("chart"),
            highlight_ms: 2500,
        }
    }
}

/// Retry behaviour for data-source calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Total attempts per call. Zero is treated as one.
    pub attempts: u32,
    /// Linear backoff step, in milliseconds.
    pub backoff_ms: u64,
}

impl FetchSettings {
    /// The backoff step as a duration.
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_ms: 100,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default log level when no `-v` flag is given.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
        }
    }
}
