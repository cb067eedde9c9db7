mod fixtures;

use agentweb_api::HttpTransport;
use agentweb_core::types::{Credential, Operation, Turn};
use agentweb_core::{ApiRequest, ClientError, TranscriptClient, Transport};
use chrono::{Duration, Utc};
use fixtures::AgentMockServer;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::rc::Rc;

fn far_future(token: &str) -> Credential {
    Credential::issued_at(token, Utc::now(), Duration::days(30))
}

fn client_for(server: &AgentMockServer) -> TranscriptClient {
    TranscriptClient::new(Rc::new(HttpTransport::new(server.uri())))
}

#[tokio::test]
async fn init_session_sends_null_body_without_authorization() {
    let server = AgentMockServer::new().await;
    server.mock_init_session("tok-issued").await;

    let token = client_for(&server).init_session().await.unwrap();

    assert_eq!(token, "tok-issued");
    let requests = server.received().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn fetch_history_carries_bearer_and_decodes_turns() {
    let server = AgentMockServer::new().await;
    server
        .mock_history(
            "tok",
            json!([
                {"role": "User", "content": "hello"},
                {"role": "Assistant", "content": "hi there"}
            ]),
        )
        .await;

    let turns = client_for(&server)
        .fetch_history(&far_future("tok"))
        .await
        .unwrap();

    assert_eq!(turns, vec![Turn::user("hello"), Turn::agent("hi there")]);
}

#[tokio::test]
async fn ask_agent_posts_message_body() {
    let server = AgentMockServer::new().await;
    server.mock_ask("tok", "what's the weather?").await;

    let data = client_for(&server)
        .ask_agent(&far_future("tok"), "what's the weather?")
        .await
        .unwrap();

    assert_eq!(data, json!(null));
}

#[tokio::test]
async fn clear_history_posts_null_body() {
    let server = AgentMockServer::new().await;
    server.mock_clear("tok").await;

    client_for(&server)
        .clear_history(&far_future("tok"))
        .await
        .unwrap();

    assert_eq!(server.received_paths().await, vec!["/clear-history"]);
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let server = AgentMockServer::new().await;
    server.mock_status("/fetch-history", 500).await;

    let err = client_for(&server)
        .fetch_history(&far_future("tok"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Status {
            operation: Operation::FetchHistory,
            status: 500
        }
    );
}

#[tokio::test]
async fn failure_envelope_is_a_server_error() {
    let server = AgentMockServer::new().await;
    server
        .mock_application_error("/ask-agent", "no choice in response")
        .await;

    let err = client_for(&server)
        .ask_agent(&far_future("tok"), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "send message server no choice in response");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on port 9 locally.
    let client = TranscriptClient::new(Rc::new(HttpTransport::new("http://127.0.0.1:9")));

    let err = client.init_session().await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Network {
            operation: Operation::InitSession,
            ..
        }
    ));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = AgentMockServer::new().await;
    server.mock_init_session("tok").await;
    let transport = HttpTransport::new(format!("{}/", server.uri()));

    let response = transport
        .post(ApiRequest::anonymous(Operation::InitSession, json!(null)))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(server.received_paths().await, vec!["/init-session"]);
}

#[tokio::test]
async fn raw_response_is_returned_undecoded() {
    let server = AgentMockServer::new().await;
    server.mock_status("/ask-agent", 418).await;
    let transport = HttpTransport::new(server.uri());
    let credential = Credential::issued_at("tok", Utc::now(), Duration::days(1));

    let response = transport
        .post(ApiRequest::authenticated(
            Operation::AskAgent,
            &credential,
            json!({"message": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 418);
    assert_eq!(response.body, "upstream failure");
    assert!(!response.is_success());
}
