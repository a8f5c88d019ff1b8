use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration load failures for callers that want them reported.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub words: WordDbConfig,
    pub search: SearchConfig,
}

/// Lexicon dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordDbConfig {
    /// Directory holding `<lexicon>.db` files. Overrides the default.
    pub word_db_dir: Option<PathBuf>,
    /// Pooled read connections per lexicon.
    pub max_connections: u32,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bound on one tag source call, in milliseconds.
    pub tag_timeout_ms: u64,
}

impl Default for WordDbConfig {
    fn default() -> Self {
        Self {
            word_db_dir: None,
            max_connections: crate::database::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tag_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/alphagram-search/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::load_from(&config_path) {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(ConfigError::Read { .. }) => {
                log::debug!("No config file at {}, using defaults", config_path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path, reporting failures.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolved lexicon directory (override or XDG default).
    pub fn word_db_dir(&self) -> PathBuf {
        self.words.word_db_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("alphagram-search").join("words"))
                .unwrap_or_else(|| PathBuf::from("words"))
        })
    }

    pub fn tag_timeout(&self) -> Duration {
        Duration::from_millis(self.search.tag_timeout_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("alphagram-search").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
