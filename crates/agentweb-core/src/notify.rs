use std::cell::RefCell;

use crate::error::ClientError;

/// Where user-visible failures go
pub trait Notifier {
    fn notify(&self, error: &ClientError);
}

/// Writes failures to the log and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, error: &ClientError) {
        log::error!("{}", error.user_message());
    }
}

/// Keeps every notification, for assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: RefCell<Vec<ClientError>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<ClientError> {
        self.seen.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.seen.borrow().iter().map(ClientError::user_message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, error: &ClientError) {
        self.seen.borrow_mut().push(error.clone());
    }
}
