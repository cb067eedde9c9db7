use agentweb_core::{ClientError, Notifier};

/// Blocking `window.alert` for every surfaced failure
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, error: &ClientError) {
        let message = error.user_message();
        log::error!("{}", message);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&message);
        }
    }
}
