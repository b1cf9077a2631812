//! Client configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the admin API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the API server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix every API route lives under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Override for the directory holding the persisted session and logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_user_agent() -> String {
    concat!("adpanel-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            state_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the usual file locations and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let config_paths = ["adpanel.toml", "config/adpanel.toml"];
        for path in &config_paths {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path).required(false));
            }
        }

        builder = builder.add_source(env_source());

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file, with environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        config.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `ADPANEL_BASE_URL`, `ADPANEL_TIMEOUT_SECS`, ...
fn env_source() -> Environment {
    Environment::with_prefix("ADPANEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
