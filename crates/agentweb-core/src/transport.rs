use agentweb_types::{Credential, Operation};
use async_trait::async_trait;

/// One POST to the agent service, before it hits the wire
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub bearer: Option<String>,
    pub body: serde_json::Value,
}

impl ApiRequest {
    pub fn anonymous(operation: Operation, body: serde_json::Value) -> Self {
        Self {
            operation,
            bearer: None,
            body,
        }
    }

    pub fn authenticated(
        operation: Operation,
        credential: &Credential,
        body: serde_json::Value,
    ) -> Self {
        Self {
            operation,
            bearer: Some(credential.value.clone()),
            body,
        }
    }

    /// Value of the `Authorization` header, if the request carries one
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {}", token))
    }
}

/// Raw answer: status code and undecoded body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never completed (connection refused, DNS, aborted fetch...)
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP seam between the protocol core and a concrete client.
///
/// Futures are not required to be `Send` so the browser's fetch bindings
/// can implement this directly.
#[async_trait(?Send)]
pub trait Transport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
