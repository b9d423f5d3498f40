use crate::constants::{
    AUTH_TOKEN_ENV_VAR, CONFIG_DIR, DATALOOM, DEFAULT_HOST, DEFAULT_PAGE_SIZE,
    DEFAULT_PREVIEW_DEBOUNCE_MS, DEFAULT_SCHEME, DEFAULT_TIMEOUT_SECS, HOST_ENV_VAR, PAGE_SIZES,
};
use crate::error::LoomError;
use crate::util;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CLIENT_CONFIG_FILENAME: &str = "client_config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_preview_debounce_ms")]
    pub preview_debounce_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_preview_debounce_ms() -> u64 {
    DEFAULT_PREVIEW_DEBOUNCE_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            default_page_size: default_page_size(),
            preview_debounce_ms: default_preview_debounce_ms(),
            auth_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(path: &Path) -> Result<ClientConfig, LoomError> {
        let contents = util::fs::read_from_path(path)?;
        let config: ClientConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Config for a server at `host`, everything else defaulted
    pub fn for_host(host: impl AsRef<str>) -> ClientConfig {
        ClientConfig {
            host: host.as_ref().to_string(),
            ..ClientConfig::default()
        }
    }

    /// Reads $HOME/.config/dataloom/client_config.toml if it exists, then applies
    /// the DATALOOM_HOST / DATALOOM_AUTH_TOKEN overrides.
    pub fn get() -> Result<ClientConfig, LoomError> {
        Ok(ClientConfig::get_saved()?.with_env_overrides())
    }

    /// The config file as saved, defaults if there is none
    pub fn get_saved() -> Result<ClientConfig, LoomError> {
        let config_dir = util::fs::dataloom_config_dir()?;
        let config_file = config_dir.join(CLIENT_CONFIG_FILENAME);
        log::debug!("looking for config file in...{:?}", config_file);
        if config_file.exists() {
            ClientConfig::new(&config_file)
        } else {
            log::debug!(
                "unable to find config file at {:?}, using defaults",
                config_file
            );
            Ok(ClientConfig::default())
        }
    }

    pub fn with_env_overrides(mut self) -> ClientConfig {
        if let Ok(host) = std::env::var(HOST_ENV_VAR) {
            if !host.trim().is_empty() {
                log::debug!("{HOST_ENV_VAR} overrides host with {host}");
                self.host = host;
            }
        }
        if let Ok(token) = std::env::var(AUTH_TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                self.auth_token = Some(token);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), LoomError> {
        if self.host.trim().is_empty() {
            return Err(LoomError::required_field("host"));
        }
        if !PAGE_SIZES.contains(&self.default_page_size) {
            return Err(LoomError::invalid_page_size(self.default_page_size));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        // Allow a full url in the host field
        if self.host.contains("://") {
            self.host.trim_end_matches('/').to_string()
        } else {
            format!("{}://{}", self.scheme, self.host.trim_end_matches('/'))
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }

    pub fn save_default(&self) -> Result<(), LoomError> {
        let config_dir = util::fs::dataloom_config_dir()?;
        let config_file = config_dir.join(CLIENT_CONFIG_FILENAME);
        log::debug!("Saving config to {:?}", config_file);
        self.save(&config_file)?;
        println!("saved config to \"$HOME/{CONFIG_DIR}/{DATALOOM}/{CLIENT_CONFIG_FILENAME}\"");
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), LoomError> {
        self.validate()?;
        let toml = toml::to_string(&self)?;
        util::fs::write_to_path(path, toml)?;
        Ok(())
    }
}
