//! Debug logging for hub-chat
//!
//! Controlled by DEBUG_LEVEL environment variable:
//! - 0 or unset: No debugging
//! - 1: Errors only
//! - 2: Info level (widget events, dispatched requests)
//! - 3: Debug level (rejected sends, dropped updates)
//! - 4: Trace level (every operation, detailed info)
//!
//! All output goes to hub_chat_debug.log in the system temp directory
//! (/tmp on Unix/macOS, %TEMP% on Windows), keeping the REPL's stdout clean.
//!
//! `log::*` records from every crate in the workspace are routed into the
//! same file by [`init_log_bridge`].

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::parse(&val),
            Err(_) => DebugLevel::Off,
        }
    }

    fn parse(val: &str) -> Self {
        match val.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    /// The debug level that lets every record at `filter` through.
    fn from_level_filter(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => DebugLevel::Off,
            log::LevelFilter::Error | log::LevelFilter::Warn => DebugLevel::Error,
            log::LevelFilter::Info => DebugLevel::Info,
            log::LevelFilter::Debug => DebugLevel::Debug,
            log::LevelFilter::Trace => DebugLevel::Trace,
        }
    }

    fn label(self) -> Option<&'static str> {
        match self {
            DebugLevel::Error => Some("ERROR"),
            DebugLevel::Info => Some("INFO "),
            DebugLevel::Debug => Some("DEBUG"),
            DebugLevel::Trace => Some("TRACE"),
            DebugLevel::Off => None,
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> std::path::PathBuf {
    std::env::temp_dir().join("hub_chat_debug.log")
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let level = DebugLevel::from_env();
        let mut logger = DebugLogger { level, file: None };
        if level != DebugLevel::Off {
            logger.open_file();
        }
        logger
    }

    fn open_file(&mut self) {
        if self.file.is_some() {
            return;
        }
        // Silently give up if the file can't be opened; stdout belongs to the REPL
        if let Ok(f) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(f);
            self.write_raw(&format!(
                "\n{}\nhub-chat debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                self.level,
                "=".repeat(80)
            ));
        }
    }

    /// Raise the level (never lowers it) and make sure the file is open.
    fn raise_level(&mut self, level: DebugLevel) {
        if level > self.level {
            self.level = level;
        }
        if self.level != DebugLevel::Off {
            self.open_file();
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level
            && let Some(level_str) = level.label()
        {
            let timestamp = get_timestamp();
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                timestamp, level_str, category, msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

/// `log::Log` implementation that writes into the debug log file and
/// optionally mirrors to stderr.
struct LogBridge {
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_str = match record.level() {
            log::Level::Error => "ERROR",
            log::Level::Warn => "WARN ",
            log::Level::Info => "INFO ",
            log::Level::Debug => "DEBUG",
            log::Level::Trace => "TRACE",
        };
        let line = format!(
            "[{}] [{}] [{}] {}\n",
            get_timestamp(),
            level_str,
            record.target(),
            record.args()
        );
        get_logger().lock().write_raw(&line);
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {}
}

static LOG_BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Resolve the effective `log` level: CLI flag, then `RUST_LOG`, then
/// `fallback` (the config file's level, when known).
pub fn resolve_level_filter(
    cli: Option<log::LevelFilter>,
    rust_log: Option<&str>,
    fallback: log::LevelFilter,
) -> log::LevelFilter {
    if let Some(level) = cli {
        return level;
    }
    rust_log
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(fallback)
}

/// Route `log` records into the debug log file.
///
/// When `RUST_LOG` is set, records are mirrored to stderr as well. The CLI
/// level takes precedence over `RUST_LOG`. Calling this twice only adjusts
/// the level.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = resolve_level_filter(level, rust_log.as_deref(), log::LevelFilter::Off);

    let bridge = LOG_BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: rust_log.is_some(),
    });
    // Fails only when a logger is already installed
    let _ = log::set_logger(bridge);
    apply_level_filter(filter);
}

/// Apply a level after startup (e.g. from the config file) unless a CLI
/// flag or `RUST_LOG` already chose one.
pub fn apply_config_level(cli: Option<log::LevelFilter>, config_level: log::LevelFilter) {
    let rust_log = std::env::var("RUST_LOG").ok();
    if cli.is_none() && rust_log.is_none() {
        apply_level_filter(config_level);
    }
}

fn apply_level_filter(filter: log::LevelFilter) {
    log::set_max_level(filter);
    get_logger()
        .lock()
        .raise_level(DebugLevel::from_level_filter(filter));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debug_level() {
        assert_eq!(DebugLevel::parse("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::parse("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse("verbose"), DebugLevel::Off);
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(
            DebugLevel::from_level_filter(log::LevelFilter::Warn),
            DebugLevel::Error
        );
        assert_eq!(
            DebugLevel::from_level_filter(log::LevelFilter::Trace),
            DebugLevel::Trace
        );
    }

    #[test]
    fn test_resolve_level_precedence() {
        use log::LevelFilter;
        assert_eq!(
            resolve_level_filter(Some(LevelFilter::Warn), Some("trace"), LevelFilter::Info),
            LevelFilter::Warn
        );
        assert_eq!(
            resolve_level_filter(None, Some("debug"), LevelFilter::Info),
            LevelFilter::Debug
        );
        assert_eq!(
            resolve_level_filter(None, Some("hub_chat=debug"), LevelFilter::Info),
            LevelFilter::Info
        );
        assert_eq!(
            resolve_level_filter(None, None, LevelFilter::Error),
            LevelFilter::Error
        );
    }
}
