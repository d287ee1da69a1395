use anyhow::{Context, Result};
use hub_chat::cli;
use hub_chat::controller::ConversationController;
use hub_chat::navigator::PageNavigator;
use hub_chat::repl::Repl;
use hub_chat_endpoint::HttpEndpoint;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    // Routes all log::info!() etc. to the debug log file; mirrors to stderr
    // when RUST_LOG is set. CLI --log-level wins over RUST_LOG, which wins
    // over the config file.
    hub_chat::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting hub-chat {}", hub_chat::VERSION);

    let config = runtime_options
        .load_config()
        .context("Failed to load configuration")?;
    hub_chat::debug::apply_config_level(
        runtime_options.log_level,
        config.log_level.to_level_filter(),
    );
    log::info!(
        "Endpoint: {} (timeout {}ms)",
        config.endpoint_url,
        config.timeout_ms()
    );

    // Create Tokio runtime for endpoint calls
    let runtime = Arc::new(Runtime::new().context("Failed to start tokio runtime")?);

    let endpoint = Arc::new(HttpEndpoint::new(
        config.endpoint_url.clone(),
        config.timeout,
    ));
    let mut controller = ConversationController::new(
        config,
        endpoint,
        PageNavigator::default(),
        runtime.handle().clone(),
    );

    let result = {
        let mut repl = Repl::new(&mut controller, runtime.handle().clone());
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        match runtime_options.once.as_deref() {
            Some(message) => repl.ask_once(message, &mut stdout).map(|_| ()),
            None => repl.run(stdin.lock(), &mut stdout),
        }
    };

    // Abort anything still in flight before the runtime goes away
    drop(controller);
    log::info!("Session ended, shutting down runtime");
    if let Ok(rt) = Arc::try_unwrap(runtime) {
        rt.shutdown_timeout(std::time::Duration::from_secs(2));
    }

    if let Err(ref e) = result {
        eprintln!("hub-chat: error: {e:#}");
    }
    result
}
