//! `AssistantConfig` - the explicit configuration object handed to the
//! conversation controller, plus its YAML persistence and environment
//! overrides.
//!
//! Only `endpoint_url`, `welcome_message` and `log_level` are read from the
//! config file. The message cap and request timeout are fixed widget
//! constants; embedders may change them through the builder methods but the
//! file and the environment cannot.

use crate::defaults::{self, API_URL_ENV_VAR};
use crate::env_vars::substitute_with;
use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for one assistant widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// URL of the assistant endpoint (`POST`, JSON in and out).
    pub endpoint_url: String,

    /// Deadline for one request. Not read from the config file.
    #[serde(skip, default = "defaults::timeout")]
    pub timeout: Duration,

    /// Maximum characters of an outbound user message. Not read from the
    /// config file.
    #[serde(skip, default = "defaults::max_message_length")]
    pub max_message_length: usize,

    /// Greeting appended as the first assistant message of a session.
    /// `null` in the file disables the greeting.
    pub welcome_message: Option<String>,

    /// Verbosity of the debug log file.
    pub log_level: LogLevel,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint_url: defaults::endpoint_url(),
            timeout: defaults::timeout(),
            max_message_length: defaults::max_message_length(),
            welcome_message: defaults::welcome_message(),
            log_level: LogLevel::default(),
        }
    }
}

impl AssistantConfig {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    /// Set the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the outbound message cap.
    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }

    /// Set or clear the welcome greeting.
    pub fn with_welcome_message(mut self, message: Option<String>) -> Self {
        self.welcome_message = message;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Request deadline in whole milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no file exists, then apply the environment override.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            log::info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit YAML file.
    ///
    /// Environment overrides are not applied here; see [`Self::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_yaml(&contents)
    }

    /// Parse a YAML document after allow-listed `${VAR}` substitution.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let contents = substitute_with(contents, |name| std::env::var(name).ok());
        let config: AssistantConfig =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Apply the `HUB_CHAT_API_URL` deploy-time override.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using a caller-supplied variable lookup.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV_VAR) {
            let url = url.trim();
            if !url.is_empty() {
                log::info!("Endpoint URL overridden by {API_URL_ENV_VAR}");
                self.endpoint_url = url.to_string();
            }
        }
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.endpoint_url).map_err(|e| {
            ConfigError::Validation(format!(
                "endpoint_url '{}' is not a valid URL: {e}",
                self.endpoint_url
            ))
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Validation(format!(
                    "endpoint_url scheme '{scheme}' is not supported; use http or https"
                )));
            }
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_message_length == 0 {
            return Err(ConfigError::Validation(
                "max_message_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (`~/.config/hub-chat/config.yaml`).
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("hub-chat")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("hub-chat")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
