//! Game configuration, layered from defaults, a JSON file, the environment and CLI flags.
//!
//! Each layer only overrides the fields it sets. Environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `COLUMNS_SEED` | `seed` |
//! | `COLUMNS_DROP_MS` | `drop_interval_ms` |
//! | `COLUMNS_FRAME_MS` | `frame_interval_ms` |
//! | `COLUMNS_LOG_FILE` | `log_file` (empty means unset) |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::Rules;
use crate::runtime::Timing;
use crate::types::{DROP_INTERVAL_MS, FRAME_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("environment variable {key}={value:?} is not a valid number")]
    InvalidEnv { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// RNG seed; `None` picks one from the clock at startup.
    pub seed: Option<u32>,
    pub drop_interval_ms: u64,
    pub frame_interval_ms: u64,
    pub reset_counters_on_game_over: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval_ms: DROP_INTERVAL_MS as u64,
            frame_interval_ms: FRAME_MS as u64,
            reset_counters_on_game_over: false,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Defaults, then the file if given, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `COLUMNS_*` overrides read through `lookup`.
    pub fn apply_env_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(seed) = parse_var(&lookup, "COLUMNS_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(ms) = parse_var(&lookup, "COLUMNS_DROP_MS")? {
            self.drop_interval_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "COLUMNS_FRAME_MS")? {
            self.frame_interval_ms = ms;
        }
        if let Some(path) = lookup("COLUMNS_LOG_FILE") {
            let path = path.trim();
            self.log_file = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("drop_interval_ms"));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("frame_interval_ms"));
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            drop_interval: Duration::from_millis(self.drop_interval_ms),
            frame_interval: Duration::from_millis(self.frame_interval_ms),
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            reset_counters_on_game_over: self.reset_counters_on_game_over,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_timing() {
        let config = GameConfig::default();
        assert_eq!(config.timing(), Timing::default());
        assert!(!config.rules().reset_counters_on_game_over);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_log_file_env_unsets_path() {
        let mut config = GameConfig {
            log_file: Some(PathBuf::from("a.log")),
            ..GameConfig::default()
        };
        config
            .apply_env_with(|key| (key == "COLUMNS_LOG_FILE").then(|| "  ".to_string()))
            .unwrap();
        assert_eq!(config.log_file, None);
    }
}
