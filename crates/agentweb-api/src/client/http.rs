use agentweb_core::{endpoint_url, normalize_base_url, ApiRequest, ApiResponse, ClientConfig, Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

/// Native HTTP transport for the agent service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = normalize_base_url(&base_url.into());
        Self { base_url, client }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.server_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = endpoint_url(&self.base_url, request.operation.path());

        let mut builder = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body);
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        log::debug!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(ApiResponse { status, body })
    }
}
