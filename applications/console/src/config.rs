/// Console configuration
use muse_client::ClientConfig;
use muse_core::FormOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(String);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_forms")]
    pub forms: FormSettings,
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
pub struct SessionSettings {
    #[serde(default = "default_credential_path")]
    pub credential_path: PathBuf,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    #[serde(default = "default_require_art_image")]
    pub require_art_image: bool,
}

impl ConsoleConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default `muse.toml`; an explicit path must exist.
    /// Environment variables look like `MUSE_API__BASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("muse.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ConfigError(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError(
                "API base URL is required (set MUSE_API__BASE_URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError(format!(
                "API base URL must start with http:// or https://, got {url:?}"
            )));
        }
        if self.session.poll_interval_secs == 0 {
            return Err(ConfigError(
                "session.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
            .with_timeouts(self.api.timeout_secs, self.api.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.session.poll_interval_secs)
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            require_art_image: self.forms.require_art_image,
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_session() -> SessionSettings {
    SessionSettings {
        credential_path: default_credential_path(),
        poll_interval_secs: default_poll_interval_secs(),
    }
}

fn default_credential_path() -> PathBuf {
    PathBuf::from("./.muse/credential")
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_forms() -> FormSettings {
    FormSettings {
        require_art_image: default_require_art_image(),
    }
}

fn default_require_art_image() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
            forms: default_forms(),
        }
    }
}
