//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Log levels accepted in `[log] level`.
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No dataset path is configured.
    NoSourceConfigured,
    /// The dataset path does not exist.
    SourceMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The dataset path exists but is not a file.
    SourceNotFile {
        /// Path that is not a file.
        path: String,
    },
    /// `attempts = 0` was configured.
    ZeroAttempts,
    /// `highlight_ms = 0` was configured.
    ZeroHighlightDelay,
    /// The log level is not one tracing understands.
    UnknownLogLevel {
        /// The configured level.
        level: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSourceConfigured => {
                write!(f, "no dataset configured; set [source] path or pass --data")
            }
            Self::SourceMissing { path } => write!(f, "dataset does not exist: {path}"),
            Self::SourceNotFile { path } => write!(f, "dataset is not a file: {path}"),
            Self::ZeroAttempts => {
                write!(f, "fetch attempts is 0; every call is tried once")
            }
            Self::ZeroHighlightDelay => {
                write!(f, "highlight_ms is 0; matches are cleared immediately")
            }
            Self::UnknownLogLevel { level } => {
                write!(f, "unknown log level '{level}'; using warn")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match config.source.path {
        None => warnings.push(ConfigWarning::NoSourceConfigured),
        Some(ref path) if !path.exists() => warnings.push(ConfigWarning::SourceMissing {
            path: path.display().to_string(),
        }),
        Some(ref path) if !path.is_file() => warnings.push(ConfigWarning::SourceNotFile {
            path: path.display().to_string(),
        }),
        Some(_) => {}
    }

    if config.fetch.attempts == 0 {
        warnings.push(ConfigWarning::ZeroAttempts);
    }
    if config.session.highlight_ms == 0 {
        warnings.push(ConfigWarning::ZeroHighlightDelay);
    }
    if !LOG_LEVELS.contains(&config.log.level.to_ascii_lowercase().as_str()) {
        warnings.push(ConfigWarning::UnknownLogLevel {
            level: config.log.level.clone(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_support::TestDir;

    fn with_source(path: PathBuf) -> Config {
        let mut config = Config::default();
        config.source.path = Some(path);
        config
    }

    #[test]
    fn test_validate_default_config() {
        let warnings = Config::default().validate();
        assert_eq!(warnings, vec![ConfigWarning::NoSourceConfigured]);
    }

    #[test]
    fn test_validate_existing_source() {
        let test_dir = TestDir::new();
        let config = with_source(test_dir.create_file("org.json"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_source_missing() {
        let test_dir = TestDir::new();
        let config = with_source(test_dir.path().join("absent.json"));
        let warnings = config.validate();
        assert!(matches!(warnings[..], [ConfigWarning::SourceMissing { .. }]));
    }

    #[test]
    fn test_validate_source_is_directory() {
        let test_dir = TestDir::new();
        let config = with_source(test_dir.create_dir("data"));
        let warnings = config.validate();
        assert!(matches!(warnings[..], [ConfigWarning::SourceNotFile { .. }]));
    }

    #[test]
    fn test_validate_zero_values_and_level() {
        let test_dir = TestDir::new();
        let mut config = with_source(test_dir.create_file("org.json"));
        config.fetch.attempts = 0;
        config.session.highlight_ms = 0;
        config.log.level = String::from("loud");

        let warnings = config.validate();
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::ZeroAttempts,
                ConfigWarning::ZeroHighlightDelay,
                ConfigWarning::UnknownLogLevel {
                    level: String::from("loud")
                },
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::SourceMissing {
            path: String::from("/data/org.json"),
        };
        assert_eq!(warning.to_string(), "dataset does not exist: /data/org.json");
        assert!(ConfigWarning::ZeroAttempts.to_string().contains("once"));
    }
}
