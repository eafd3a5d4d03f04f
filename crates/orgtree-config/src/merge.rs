//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the dataset path.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, FetchSettings, LogSettings, SessionSettings, SourceSettings,
    parse::{RawConfig, RawFetchSettings, RawLogSettings, RawSessionSettings},
    resolve::resolve_source_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config). For every scalar the
/// first defined value wins. The dataset path is resolved against the directory of the
/// file that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let source = merge_source_settings(configs)?;
    let session = merge_section(configs, |raw| raw.session.as_ref(), apply_raw_session);
    let fetch = merge_section(configs, |raw| raw.fetch.as_ref(), apply_raw_fetch);
    let log = merge_section(configs, |raw| raw.log.as_ref(), apply_raw_log);
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        source,
        session,
        fetch,
        log,
        config_root,
    })
}

/// Merges one section, applying files from lowest to highest precedence.
fn merge_section<T, R>(
    configs: &[ParsedConfig],
    section: impl Fn(&RawConfig) -> Option<&R>,
    apply: impl Fn(&mut T, &R),
) -> T
where
    T: Default,
{
    let mut result = T::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(raw) = section(&parsed.config) {
            apply(&mut result, raw);
        }
    }

    result
}

/// Merges the dataset section, resolving the winning path against its file's directory.
fn merge_source_settings(configs: &[ParsedConfig]) -> Result<SourceSettings, ConfigError> {
    let mut result = SourceSettings::default();

    for parsed in configs.iter().rev() {
        let Some(raw) = parsed.config.source.as_ref() else {
            continue;
        };
        if let Some(v) = raw.latency_ms {
            result.latency_ms = v;
        }
        if let Some(ref path) = raw.path {
            let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new("."));
            result.path = Some(resolve_source_path(path, config_dir)?);
        }
    }

    Ok(result)
}

/// Applies raw session settings to result, overwriting any present values.
fn apply_raw_session(result: &mut SessionSettings, raw: &RawSessionSettings) {
    if let Some(ref v) = raw.root {
        result.root = v.clone();
    }
    if let Some(ref v) = raw.container {
        result.container = v.clone();
    }
    if let Some(v) = raw.highlight_ms {
        result.highlight_ms = v;
    }
}

/// Applies raw retry settings to result.
fn apply_raw_fetch(result: &mut FetchSettings, raw: &RawFetchSettings) {
    if let Some(v) = raw.attempts {
        result.attempts = v;
    }
    if let Some(v) = raw.backoff_ms {
        result.backoff_ms = v;
    }
}

/// Applies raw logging settings to result.
fn apply_raw_log(result: &mut LogSettings, raw: &RawLogSettings) {
    if let Some(ref v) = raw.level {
        result.level = v.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config, test_support::TestDir};

    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path,
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.source.path.is_none());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_merge_single_config() {
        let test_dir = TestDir::new();
        let data = test_dir.create_file("org.json");
        let config = merge_configs(&[parsed(
            test_dir.path().join(".orgtree.toml"),
            "[source]\npath = \"./org.json\"\nlatency_ms = 20\n",
        )])
        .unwrap();

        assert_eq!(config.source.path, Some(data.canonicalize().unwrap()));
        assert_eq!(config.source.latency_ms, 20);
        assert_eq!(config.config_root.as_deref(), Some(test_dir.path()));
    }

    #[test]
    fn test_merge_scalar_override() {
        let test_dir = TestDir::new();
        let configs = [
            parsed(
                test_dir.path().join("child/.orgtree.toml"),
                "[fetch]\nattempts = 7\n",
            ),
            parsed(
                test_dir.path().join(".orgtree.toml"),
                "[fetch]\nattempts = 1\nbackoff_ms = 5\n\n[log]\nlevel = \"debug\"\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.fetch.attempts, 7);
        assert_eq!(config.fetch.backoff_ms, 5);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.session.highlight_ms, 2500);
    }

    #[test]
    fn test_source_path_resolves_against_defining_file() {
        let test_dir = TestDir::new();
        let data = test_dir.create_file("shared/org.json");
        let configs = [
            parsed(
                test_dir.path().join("project/.orgtree.toml"),
                "[source]\nlatency_ms = 50\n",
            ),
            parsed(
                test_dir.path().join("shared/.orgtree.toml"),
                "[source]\npath = \"org.json\"\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.source.path, Some(data.canonicalize().unwrap()));
        assert_eq!(config.source.latency_ms, 50);
    }

    #[test]
    fn test_merge_three_way_session() {
        let test_dir = TestDir::new();
        let configs = [
            parsed(
                test_dir.path().join("a/b/.orgtree.toml"),
                "[session]\nhighlight_ms = 100\n",
            ),
            parsed(
                test_dir.path().join("a/.orgtree.toml"),
                "[session]\ncontainer = \"board\"\nhighlight_ms = 200\n",
            ),
            parsed(
                test_dir.path().join(".orgtree.toml"),
                "[session]\nroot = \"ceo\"\ncontainer = \"wall\"\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.session.root, "ceo");
        assert_eq!(config.session.container, "board");
        assert_eq!(config.session.highlight_ms, 100);
    }
}
