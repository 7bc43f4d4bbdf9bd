/// Application configuration
use crate::error::ConfigError;
use directory_client::{ClientConfig, DEFAULT_BASE_URL};
use directory_query::CacheOptions;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "userdir.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub filters: FilterSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,

    #[serde(default = "default_gc_secs")]
    pub gc_secs: u64,

    #[serde(default = "default_retry")]
    pub retry: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterSettings {
    /// Quiet period before an email edit triggers a request
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Mirror the filters into the session's address bar
    #[serde(default = "default_sync_address")]
    pub sync_address: bool,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; without one, `userdir.toml` is read
    /// when present. `USERDIR_`-prefixed variables override the file, with
    /// `__` between section and key (`USERDIR_API__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("USERDIR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "API base URL is required (set USERDIR_API__BASE_URL)".to_string(),
            ));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API base URL must use http or https: {}",
                base_url
            )));
        }

        if self.cache.capacity == 0 {
            return Err(ConfigError::Invalid(
                "Cache capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.trim()).with_timeouts(
            Duration::from_secs(self.api.timeout_secs),
            Duration::from_secs(self.api.connect_timeout_secs),
        )
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            stale_time: Duration::from_secs(self.cache.stale_secs),
            gc_time: Duration::from_secs(self.cache.gc_secs),
            retry: self.cache.retry,
            retry_delay: Duration::from_millis(self.cache.retry_delay_ms),
            capacity: NonZeroUsize::new(self.cache.capacity).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.filters.debounce_ms)
    }
}

// Default values
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_stale_secs() -> u64 {
    5 * 60
}

fn default_gc_secs() -> u64 {
    10 * 60
}

fn default_retry() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_capacity() -> usize {
    256
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_sync_address() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            gc_secs: default_gc_secs(),
            retry: default_retry(),
            retry_delay_ms: default_retry_delay_ms(),
            capacity: default_capacity(),
        }
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            sync_address: default_sync_address(),
        }
    }
}
