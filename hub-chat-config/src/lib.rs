//! Configuration system for the hub-chat assistant widget.
//!
//! This crate provides configuration loading and default values for the
//! conversation controller. It includes:
//!
//! - [`AssistantConfig`], the explicit configuration object handed to the
//!   controller at construction
//! - The fixed widget constants (message cap, request timeout, fallback URL)
//! - YAML persistence with allow-listed `${VAR}` substitution
//! - The `HUB_CHAT_API_URL` deploy-time override

pub mod config;
pub mod defaults;
mod env_vars;
mod error;
mod types;

pub use config::AssistantConfig;
pub use defaults::{
    API_URL_ENV_VAR, DEFAULT_ENDPOINT_URL, MAX_MESSAGE_LENGTH, REQUEST_TIMEOUT, REQUEST_TIMEOUT_MS,
    WELCOME_MESSAGE,
};
pub use env_vars::{is_env_var_allowed, substitute_variables};
pub use error::ConfigError;
pub use types::LogLevel;
