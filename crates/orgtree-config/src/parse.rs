//! Configuration file parsing.
//!
//! Parses individual `.orgtree.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Dataset section.
    pub source: Option<RawSourceSettings>,
    /// Session section.
    pub session: Option<RawSessionSettings>,
    /// Retry section.
    pub fetch: Option<RawFetchSettings>,
    /// Logging section.
    pub log: Option<RawLogSettings>,
}

/// Raw dataset settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSourceSettings {
    /// Dataset path as written, before tilde expansion and relative resolution.
    pub path: Option<String>,
    /// Simulated per-call latency in milliseconds.
    pub latency_ms: Option<u64>,
}

/// Raw session settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSessionSettings {
    /// Identifier of the chart root.
    pub root: Option<String>,
    /// Container name.
    pub container: Option<String>,
    /// Highlight-clear delay in milliseconds.
    pub highlight_ms: Option<u64>,
}

/// Raw retry settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFetchSettings {
    /// Total attempts per call.
    pub attempts: Option<u32>,
    /// Backoff step in milliseconds.
    pub backoff_ms: Option<u64>,
}

/// Raw logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLogSettings {
    /// Default log level.
    pub level: Option<String>,
}

/// Reads and parses a configuration file.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.source.is_none());
        assert!(config.session.is_none());
        assert!(config.fetch.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml = r#"
[source]
path = "./org.json"

[fetch]
attempts = 5
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.path.as_deref(), Some("./org.json"));
        assert!(source.latency_ms.is_none());

        let fetch = config.fetch.unwrap();
        assert_eq!(fetch.attempts, Some(5));
        assert!(fetch.backoff_ms.is_none());
        assert!(config.session.is_none());
    }

    #[test]
    fn test_parse_session_section() {
        let toml = r#"
[session]
root = "ceo"
highlight_ms = 1000
"#;
        let session = parse_config(toml).unwrap().session.unwrap();
        assert_eq!(session.root.as_deref(), Some("ceo"));
        assert!(session.container.is_none());
        assert_eq!(session.highlight_ms, Some(1000));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let err = parse_config_str("[fetch]\nattempts = \"many\"\n", Path::new("bad.toml"))
            .unwrap_err();
        match err {
            ConfigError::ParseToml { path, .. } => assert_eq!(path, Path::new("bad.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let test_dir = TestDir::new();
        let err = parse_config_file(&test_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_is_root_config() {
        let test_dir = TestDir::new();
        let root = test_dir.write_config("a", "root = true\n");
        let plain = test_dir.write_config("b", "");
        let broken = test_dir.write_config("c", "root = [");

        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
    }
}
