use agentweb_core::{ClientError, Notifier};
use colored::Colorize;

/// Prints surfaced failures to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, error: &ClientError) {
        log::debug!("surfacing {:?}", error);
        eprintln!("{} {}", "✗".red(), error.user_message().red());
    }
}
