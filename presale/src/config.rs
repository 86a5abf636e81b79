use std::path::PathBuf;

use url::Url;

use crate::error::{PresaleError, Result};

/// Default API server used by the mobile build.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Environment variable overriding [`PresaleConfig::api_base_url`].
pub const API_URL_ENV: &str = "PRESALE_API_URL";

/// Environment variable overriding [`PresaleConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "PRESALE_DATA_DIR";

/// Configuration for the presale client.
#[derive(Debug, Clone, PartialEq)]
pub struct PresaleConfig {
    /// Base URL for the presale REST server (e.g. `http://localhost:3001`).
    pub api_base_url: String,
    /// Directory holding the persisted session records.
    pub data_dir: PathBuf,
}

impl Default for PresaleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl PresaleConfig {
    /// Defaults, overridden by `PRESALE_API_URL` / `PRESALE_DATA_DIR` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_base_url = url;
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            PresaleError::Config(format!("invalid API URL {:?}: {e}", self.api_base_url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(PresaleError::Config(format!(
                "unsupported API URL scheme {other:?}"
            ))),
        }
    }
}

/// `<platform data dir>/presale`, falling back to `./.presale`.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("presale"))
        .unwrap_or_else(|| PathBuf::from(".presale"))
}
