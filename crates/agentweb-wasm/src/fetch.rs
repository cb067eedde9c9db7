use agentweb_core::{endpoint_url, normalize_base_url, ApiRequest, ApiResponse, Transport, TransportError};
use async_trait::async_trait;
use gloo_net::http::Request;

/// Transport over the browser's `fetch`
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = endpoint_url(&self.base_url, request.operation.path());

        let mut builder = Request::post(&url).header("Content-Type", "application/json");
        if let Some(authorization) = request.authorization() {
            builder = builder.header("Authorization", &authorization);
        }

        let response = builder
            .json(&request.body)
            .map_err(|e| TransportError(format!("Failed to serialize: {:?}", e)))?
            .send()
            .await
            .map_err(|e| TransportError(format!("Request failed: {:?}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("Failed to read response: {:?}", e)))?;

        log::debug!("{} -> {}", url, status);
        Ok(ApiResponse { status, body })
    }
}
