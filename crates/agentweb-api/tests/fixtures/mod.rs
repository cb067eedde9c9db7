#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Mock agent service for exercising the HTTP transport
pub struct AgentMockServer {
    server: MockServer,
}

impl AgentMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock `init-session` issuing `token`
    pub async fn mock_init_session(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/init-session"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!(null)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": token
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock `fetch-history` for `token`, answering `turns` every time
    pub async fn mock_history(&self, token: &str, turns: Value) {
        Mock::given(method("POST"))
            .and(path("/fetch-history"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .and(body_json(json!(null)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": turns
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock `fetch-history` answering `turns` for the next `times` calls only
    pub async fn mock_history_times(&self, token: &str, turns: Value, times: u64) {
        Mock::given(method("POST"))
            .and(path("/fetch-history"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": turns
            })))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Mock `ask-agent` accepting exactly `message`
    pub async fn mock_ask(&self, token: &str, message: &str) {
        Mock::given(method("POST"))
            .and(path("/ask-agent"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .and(body_json(json!({ "message": message })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": null
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock `clear-history`
    pub async fn mock_clear(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/clear-history"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .and(body_json(json!(null)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": null
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock any call to `endpoint` failing with `status`
    pub async fn mock_status(&self, endpoint: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&self.server)
            .await;
    }

    /// Mock any call to `endpoint` answering a failure envelope
    pub async fn mock_application_error(&self, endpoint: &str, err: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "err": err
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Paths of every request received so far, in order
    pub async fn received_paths(&self) -> Vec<String> {
        self.received()
            .await
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}
