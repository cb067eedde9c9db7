use agentweb_types::{credential_ttl, CREDENTIAL_KEY, DEFAULT_SERVER_URL};
use chrono::Duration;

/// Base URL baked in at compile time, falling back to the local dev server
pub fn build_time_server_url() -> &'static str {
    option_env!("AGENTWEB_SERVER_URL").unwrap_or(DEFAULT_SERVER_URL)
}

/// Client configuration shared by every front-end
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub credential_key: String,
    pub credential_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: build_time_server_url().to_string(),
            credential_key: CREDENTIAL_KEY.to_string(),
            credential_ttl: credential_ttl(),
        }
    }
}

impl ClientConfig {
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = normalize_base_url(&url.into());
        self
    }
}

/// Strip trailing slashes so operation paths can be appended verbatim
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Full URL of an endpoint path under `base`
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
