use agentweb_types::Operation;
use thiserror::Error;

/// Every way a request against the agent service can fail.
///
/// None of these are fatal: the controller surfaces them and leaves its
/// state as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status
    #[error("{operation} status {status}")]
    Status { operation: Operation, status: u16 },

    /// The service answered `{ "success": false, "err": .. }`
    #[error("{operation} server {message}")]
    Server { operation: Operation, message: String },

    /// The request never produced a response
    #[error("{operation} request failed: {message}")]
    Network { operation: Operation, message: String },

    /// The body was not the envelope we expect
    #[error("{operation} malformed response: {message}")]
    Decode { operation: Operation, message: String },

    /// An authenticated operation was requested before a credential exists
    #[error("{operation} needs a session, none is active")]
    NoSession { operation: Operation },
}

impl ClientError {
    pub fn operation(&self) -> Operation {
        match self {
            ClientError::Status { operation, .. }
            | ClientError::Server { operation, .. }
            | ClientError::Network { operation, .. }
            | ClientError::Decode { operation, .. }
            | ClientError::NoSession { operation } => *operation,
        }
    }

    /// Text shown in the blocking notification
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Failure to persist a credential
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential record could not be encoded: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
}
