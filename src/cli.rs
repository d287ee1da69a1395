//! Command-line interface for hub-chat.
//!
//! Parses flags into [`RuntimeOptions`] and handles the subcommands that
//! exit without starting the chat session.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hub_chat_config::AssistantConfig;

/// hub-chat - supplier hub assistant in your terminal
#[derive(Parser)]
#[command(name = "hub-chat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Assistant endpoint URL (overrides config and HUB_CHAT_API_URL)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start without the welcome message
    #[arg(long)]
    pub no_welcome: bool,

    /// Send one message, print the reply and exit
    #[arg(long, value_name = "MESSAGE")]
    pub once: Option<String>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration as YAML
    ShowConfig,
    /// Print the configuration file path
    ConfigPath,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the session
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Endpoint URL override
    pub endpoint: Option<String>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
    /// Suppress the welcome message
    pub no_welcome: bool,
    /// One-shot message (non-interactive)
    pub once: Option<String>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Load the configuration these options point at and apply the CLI
    /// overrides on top.
    pub fn load_config(&self) -> anyhow::Result<AssistantConfig> {
        let mut config = match &self.config_path {
            Some(path) => {
                let mut config = AssistantConfig::load_from(path)?;
                config.apply_env_overrides();
                config
            }
            None => AssistantConfig::load()?,
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI flags to an already loaded configuration.
    pub fn apply_to(&self, config: &mut AssistantConfig) {
        if let Some(url) = &self.endpoint {
            config.endpoint_url = url.clone();
        }
        if self.no_welcome {
            config.welcome_message = None;
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal session startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    process(Cli::parse())
}

fn process(cli: Cli) -> CliResult {
    let options = RuntimeOptions {
        endpoint: cli.endpoint,
        config_path: cli.config,
        no_welcome: cli.no_welcome,
        once: cli.once,
        log_level: cli.log_level.map(|l| l.to_level_filter()),
    };

    match cli.command {
        Some(Commands::ShowConfig) => CliResult::Exit(show_config(&options)),
        Some(Commands::ConfigPath) => {
            println!("{}", AssistantConfig::config_path().display());
            CliResult::Exit(0)
        }
        None => CliResult::Continue(options),
    }
}

fn show_config(options: &RuntimeOptions) -> i32 {
    let result = options.load_config().and_then(|config| {
        let yaml = serde_yaml_ng::to_string(&config)?;
        Ok(yaml)
    });
    match result {
        Ok(yaml) => {
            print!("{yaml}");
            0
        }
        Err(e) => {
            eprintln!("hub-chat: error: {e:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_runtime_options() {
        let cli = Cli::parse_from([
            "hub-chat",
            "--endpoint",
            "https://assist.example.com/chat",
            "--no-welcome",
            "--log-level",
            "debug",
        ]);
        let CliResult::Continue(options) = process(cli) else {
            panic!("expected Continue");
        };
        assert_eq!(
            options.endpoint.as_deref(),
            Some("https://assist.example.com/chat")
        );
        assert!(options.no_welcome);
        assert_eq!(options.log_level, Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_apply_overrides() {
        let options = RuntimeOptions {
            endpoint: Some("http://localhost:9000/chat".to_string()),
            no_welcome: true,
            ..Default::default()
        };
        let mut config = AssistantConfig::default();
        options.apply_to(&mut config);
        assert_eq!(config.endpoint_url, "http://localhost:9000/chat");
        assert_eq!(config.welcome_message, None);
    }

    #[test]
    fn test_load_config_from_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "endpoint_url: \"https://a.example.com/chat\"\n").unwrap();
        let options = RuntimeOptions {
            config_path: Some(path),
            endpoint: Some("https://b.example.com/chat".to_string()),
            ..Default::default()
        };
        let config = options.load_config().unwrap();
        assert_eq!(config.endpoint_url, "https://b.example.com/chat");
    }

    #[test]
    fn test_invalid_endpoint_flag_fails_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "log_level: info\n").unwrap();
        let options = RuntimeOptions {
            config_path: Some(path),
            endpoint: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(options.load_config().is_err());
    }
}
