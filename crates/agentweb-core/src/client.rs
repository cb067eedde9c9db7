use std::rc::Rc;

use agentweb_types::{AskAgentBody, Credential, Envelope, Operation, Turn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Typed client for the agent service endpoints.
///
/// Normalizes the two failure layers (HTTP status, `success: false`
/// envelope) into [`ClientError`] and hands `data` back untouched.
#[derive(Clone)]
pub struct TranscriptClient {
    transport: Rc<dyn Transport>,
}

impl TranscriptClient {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Ask the service for a brand new credential
    pub async fn init_session(&self) -> Result<String, ClientError> {
        let request = ApiRequest::anonymous(Operation::InitSession, Value::Null);
        self.call::<String>(request)
            .await?
            .ok_or_else(|| missing_data(Operation::InitSession))
    }

    /// Full ordered transcript of the session
    pub async fn fetch_history(&self, credential: &Credential) -> Result<Vec<Turn>, ClientError> {
        let request = ApiRequest::authenticated(Operation::FetchHistory, credential, Value::Null);
        self.call::<Vec<Turn>>(request)
            .await?
            .ok_or_else(|| missing_data(Operation::FetchHistory))
    }

    /// Submit one user turn. The returned payload is whatever the service
    /// put in `data`; it is not the agent's reply.
    pub async fn ask_agent(
        &self,
        credential: &Credential,
        message: &str,
    ) -> Result<Value, ClientError> {
        let body = serde_json::to_value(AskAgentBody {
            message: message.to_string(),
        })
        .map_err(|e| ClientError::Decode {
            operation: Operation::AskAgent,
            message: e.to_string(),
        })?;
        let request = ApiRequest::authenticated(Operation::AskAgent, credential, body);
        Ok(self.call::<Value>(request).await?.unwrap_or(Value::Null))
    }

    /// Empty the transcript server-side
    pub async fn clear_history(&self, credential: &Credential) -> Result<Value, ClientError> {
        let request = ApiRequest::authenticated(Operation::ClearHistory, credential, Value::Null);
        Ok(self.call::<Value>(request).await?.unwrap_or(Value::Null))
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>, ClientError> {
        let operation = request.operation;
        log::debug!("POST {} (auth: {})", operation.path(), request.bearer.is_some());

        let response = self
            .transport
            .post(request)
            .await
            .map_err(|e| ClientError::Network {
                operation,
                message: e.to_string(),
            })?;

        decode_envelope(operation, response)
    }
}

/// Turn a raw response into `data`, or the error the user should see
pub fn decode_envelope<T: DeserializeOwned>(
    operation: Operation,
    response: ApiResponse,
) -> Result<Option<T>, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Status {
            operation,
            status: response.status,
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_str(&response.body).map_err(|e| ClientError::Decode {
            operation,
            message: e.to_string(),
        })?;

    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(ClientError::Server {
            operation,
            message: envelope.error_detail(),
        })
    }
}

fn missing_data(operation: Operation) -> ClientError {
    ClientError::Decode {
        operation,
        message: "success envelope without data".to_string(),
    }
}
