pub mod commands;
pub mod repl;
pub mod setup;

pub use commands::run_command;
pub use repl::run_repl_mode;
pub use setup::{init_logging, AppConfig};
