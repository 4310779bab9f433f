use crate::constants::{
    DEFAULT_DISTRIBUTOR_MATCH, DEFAULT_DISTRIBUTOR_NAME, DEFAULT_LINK_TOKEN, DEFAULT_LOG_FILE,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_SEARCH_CHECK_INTERVAL,
};
use crate::core::LbrError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Settings threaded through the driver, the rewrite engine and the resolver.
///
/// Missing keys in the configuration file fall back to their defaults, so an
/// empty file is a valid configuration.
///
/// # Examples
///
/// ```rust
/// use lbrmeta::config::UpdaterConfig;
///
/// let config = UpdaterConfig::default();
/// assert_eq!(config.link_token, "DISTLINK");
/// assert_eq!(config.distributor_match, "digikey");
/// assert!(!config.verbose);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Token identifying link marker fields (`[PREFIX_]TOKEN[_SUFFIX]`).
    pub link_token: String,

    /// Substring a link must contain to be sent to the resolver.
    ///
    /// Links without it are skipped silently.
    pub distributor_match: String,

    /// Value written to generated `DIST` fields.
    pub distributor_name: String,

    /// Ceiling on page fetches per link. Exhausting it reports the link invalid.
    pub max_attempts: u32,

    /// Pause between two fetch attempts, in milliseconds.
    pub retry_delay_ms: u64,

    /// How often (in attempts) a failed fetch is checked for a search page.
    pub search_check_interval: u32,

    /// Path of the append-only warning log.
    pub log_file: PathBuf,

    /// Print per-part status lines while updating.
    ///
    /// Never read from the file; set by `--verbose`.
    #[serde(skip)]
    pub verbose: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            link_token: DEFAULT_LINK_TOKEN.to_string(),
            distributor_match: DEFAULT_DISTRIBUTOR_MATCH.to_string(),
            distributor_name: DEFAULT_DISTRIBUTOR_NAME.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            search_check_interval: DEFAULT_SEARCH_CHECK_INTERVAL,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            verbose: false,
        }
    }
}

impl UpdaterConfig {
    /// Load configuration from an optional path.
    ///
    /// With `None` the default location is used. A file that does not exist
    /// yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is not valid
    /// TOML, or fails [`validate`](Self::validate).
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path),
            None => Self::default_path(),
        };

        match path {
            Some(path) if path.exists() => Self::load_from(&path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds
    /// unusable values.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| LbrError::ConfigError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| LbrError::ConfigError {
            message: format!("{}: {}", path.display(), e.message()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file path (`~/.lbrmeta/config.toml`).
    ///
    /// Returns `None` when the home directory cannot be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".lbrmeta").join("config.toml"))
    }

    /// Check that the configured values can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`LbrError::ConfigError`] for an empty or whitespace-containing
    /// link token, an empty distributor match, or a zero attempt ceiling or
    /// search interval.
    pub fn validate(&self) -> Result<(), LbrError> {
        if self.link_token.is_empty() || self.link_token.chars().any(char::is_whitespace) {
            return Err(LbrError::ConfigError {
                message: format!("link_token '{}' must be a non-empty word", self.link_token),
            });
        }
        if self.distributor_match.is_empty() {
            return Err(LbrError::ConfigError {
                message: "distributor_match must not be empty".to_string(),
            });
        }
        if self.max_attempts == 0 {
            return Err(LbrError::ConfigError {
                message: "max_attempts must be at least 1".to_string(),
            });
        }
        if self.search_check_interval == 0 {
            return Err(LbrError::ConfigError {
                message: "search_check_interval must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
