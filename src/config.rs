use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Verbosity of the log output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> tracing::Level {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Oldest undo entries are dropped past this many; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<NonZeroUsize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// An explicit path must exist; otherwise fall back to the default
    /// location, and to built-in defaults if nothing is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(explicit, &default_path())
    }

    /// `load` with the fallback location given explicitly
    pub fn load_from(explicit: Option<&Path>, default: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if default.is_file() {
            Self::from_file(default)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn default_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/zypher/config.toml")
    } else {
        PathBuf::from(".config/zypher/config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.history.max_depth, None);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_parse_full() {
        let config = Config::from_toml(
            r#"
            [history]
            max_depth = 3

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.history.max_depth, NonZeroUsize::new(3));
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(tracing::Level::from(config.log.level), tracing::Level::DEBUG);
    }

    #[test]
    fn test_missing_sections_default() {
        let config = Config::from_toml("[log]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(config.history, HistoryConfig::default());
        assert_eq!(config.log.level, LogLevel::Warn);

        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = Config::from_toml("[history]\nmax_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(Config::from_toml("[log]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[history]\nmax_depth = 10").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.history.max_depth, NonZeroUsize::new(10));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_without_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.toml");

        assert_eq!(Config::load_from(None, &fallback).unwrap(), Config::default());
    }

    #[test]
    fn test_load_reads_default_file_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[history]\nmax_depth = 7\n[log]\nlevel = \"error\"\n").unwrap();

        let config = Config::load_from(None, &fallback).unwrap();
        assert_eq!(config.history.max_depth, NonZeroUsize::new(7));
        assert_eq!(config.log.level, LogLevel::Error);
    }

    #[test]
    fn test_explicit_path_wins_over_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[history]\nmax_depth = 7\n").unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[history]\nmax_depth = 2\n").unwrap();

        let config = Config::load_from(Some(&explicit), &fallback).unwrap();
        assert_eq!(config.history.max_depth, NonZeroUsize::new(2));
    }

    #[test]
    fn test_malformed_default_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("config.toml");
        std::fs::write(&fallback, "[history\n").unwrap();

        assert!(matches!(
            Config::load_from(None, &fallback),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serialize_skips_unset_depth() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(!text.contains("max_depth"));
        assert!(text.contains("level = \"info\""));
    }
}
