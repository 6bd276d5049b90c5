//! HTTP round trips against a local mock node.

use std::sync::Arc;

use mochimo_rpc::{ConstructionClient, HttpTransport, RpcError};
use mochimo_types::{NetworkIdentifier, TransactionIdentifier};

fn client_for(server: &mockito::ServerGuard) -> ConstructionClient<HttpTransport> {
    ConstructionClient::new(
        server.url(),
        NetworkIdentifier::mainnet(),
        Arc::new(HttpTransport::new().unwrap()),
    )
}

#[tokio::test]
async fn submit_posts_json_and_returns_hash() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/construction/submit")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "network_identifier": { "blockchain": "mochimo", "network": "mainnet" },
            "signed_transaction": "00aa"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"transaction_identifier":{"hash":"0xdeadbeef"}}"#)
        .create_async()
        .await;

    let id = client_for(&server).submit("00aa").await.unwrap();
    assert_eq!(id, TransactionIdentifier::new("0xdeadbeef"));
    mock.assert_async().await;
}

#[tokio::test]
async fn error_envelope_on_500_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/construction/preprocess")
        .with_status(500)
        .with_body(r#"{"code":3,"message":"invalid operations","retriable":false}"#)
        .create_async()
        .await;

    let metadata = mochimo_types::PreprocessMetadata::default();
    let err = client_for(&server)
        .preprocess(&[], &metadata)
        .await
        .unwrap_err();
    match err {
        RpcError::Protocol { code, message, retriable, .. } => {
            assert_eq!(code, 3);
            assert_eq!(message, "invalid operations");
            assert!(!retriable);
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_text_failure_is_http_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/mempool")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let err = client_for(&server).mempool().await.unwrap_err();
    assert!(matches!(err, RpcError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn unreachable_node_is_transport_error() {
    // Port 9 (discard) is not served on loopback in test environments.
    let client = ConstructionClient::new(
        "http://127.0.0.1:9",
        NetworkIdentifier::mainnet(),
        Arc::new(HttpTransport::new().unwrap()),
    );
    let err = client.mempool().await.unwrap_err();
    assert!(matches!(err, RpcError::Transport { .. }));
}
