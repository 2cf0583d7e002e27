use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use hachidori_api::client::DEFAULT_BASE_URL;
use hachidori_api::{FetchOptions, DEFAULT_BATCH_SIZE, DEFAULT_REQUEST_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::HachidoriError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = DEFAULT_REQUEST_TIMEOUT.as_secs();

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Catalog service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub batch_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Batching and timeout settings for the metadata fetcher.
    pub fn fetch_options(&self) -> Result<FetchOptions, HachidoriError> {
        let batch_size = NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| HachidoriError::Config("batch_size must be at least 1".into()))?;
        if self.request_timeout_secs == 0 {
            return Err(HachidoriError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(FetchOptions {
            batch_size,
            request_timeout: self.request_timeout(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, HachidoriError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, HachidoriError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| HachidoriError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Reject values the fetch pipeline cannot run with.
    pub fn validate(&self) -> Result<(), HachidoriError> {
        let base = url::Url::parse(&self.api.base_url)
            .map_err(|e| HachidoriError::Config(format!("base_url {:?}: {e}", self.api.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(HachidoriError::Config(format!(
                "base_url {:?} cannot have endpoint paths appended",
                self.api.base_url
            )));
        }
        self.api.fetch_options()?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "hachidori")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.api.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbatch_size = 8\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.batch_size, 8);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);

        let options = config.api.fetch_options().unwrap();
        assert_eq!(options.batch_size.get(), 8);
        assert_eq!(options.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbatch_size = 0\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(HachidoriError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = AppConfig {
            api: ApiConfig {
                base_url: "hummingbird.me".into(),
                ..ApiConfig::default()
            },
        };
        assert!(matches!(config.validate(), Err(HachidoriError::Config(_))));
    }

    #[test]
    fn test_rejects_non_hierarchical_base_url() {
        for base_url in ["mailto:x", "data:text/plain,hi"] {
            let config = AppConfig {
                api: ApiConfig {
                    base_url: base_url.into(),
                    ..ApiConfig::default()
                },
            };
            assert!(
                matches!(config.validate(), Err(HachidoriError::Config(_))),
                "{base_url} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let api = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(api.fetch_options().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::load_from(&dir.path().join("nope.toml")),
            Err(HachidoriError::Io(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
