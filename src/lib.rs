// Library exports for testing and embedding
//
// # Threading
//
// The conversation controller is driven from one thread (the host's event
// loop). Endpoint calls run on the tokio blocking pool and report back over
// an mpsc channel; nothing else is shared between threads. The only lock is
// the `parking_lot::Mutex` around the debug log file.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod chat;
pub mod cli;
pub mod controller;
pub mod input;
pub mod navigator;
pub mod repl;
pub mod sanitize;
pub mod view;

pub use controller::{ConversationController, SendOutcome};
pub use navigator::{HubPage, Navigator, PageNavigator};
