//! agentweb terminal client
//!
//! Same session and transcript machinery as the browser binding, with a
//! file-backed credential and a line-oriented front-end.

pub mod app;
pub mod cli;
pub mod notify;
pub mod render;
pub mod store;

pub use app::{init_logging, run_command, run_repl_mode, AppConfig};
pub use cli::{Cli, Commands};
pub use notify::ConsoleNotifier;
pub use render::{render_turn, TranscriptPrinter};
pub use store::FileCredentialStore;
