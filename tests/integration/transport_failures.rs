//! Calls that never get a usable response still resolve to `Failure`.

use anthropic_messages::transport::{TransportRequest, TransportResponse};
use anthropic_messages::{FailureKind, MessagesClient, OperationResult, Transport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

use crate::mock_server::sample_request;

struct Refusing;

#[async_trait]
impl Transport for Refusing {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Other("connection refused".into()))
    }
}

struct Silent;

#[async_trait]
impl Transport for Silent {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Other(String::new()))
    }
}

struct Panicking;

#[async_trait]
impl Transport for Panicking {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        panic!("transport exploded")
    }
}

struct Hanging;

#[async_trait]
impl Transport for Hanging {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(TransportError::Other("unreachable".into()))
    }
}

fn client_with(transport: impl Transport + 'static) -> MessagesClient {
    MessagesClient::builder("test-key")
        .transport(transport)
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_connection_refused_over_http() {
    // Port 1 is reserved and nothing listens on it.
    let client = MessagesClient::builder("test-key")
        .base_url("http://127.0.0.1:1/v1")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build");

    let result = client.create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.kind, FailureKind::TransportFailure);
    assert_eq!(err.status, None);
    assert!(!err.resolved_message().is_empty());
}

#[tokio::test]
async fn test_transport_error_message_is_surfaced() {
    let result = client_with(Refusing).create_message(&sample_request()).await;
    match result {
        OperationResult::Failure(err) => {
            assert_eq!(err.resolved_message(), "connection refused");
            assert_eq!(err.kind, FailureKind::TransportFailure);
        }
        OperationResult::Success(_) => panic!("expected failure"),
    }
}

#[tokio::test]
async fn test_blank_transport_error_uses_fallback() {
    let result = client_with(Silent).create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.resolved_message(), "Unknown error occurred");
}

#[tokio::test]
async fn test_panicking_transport_is_contained() {
    let result = client_with(Panicking).create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.kind, FailureKind::TransportFailure);
    assert_eq!(err.resolved_message(), "Transport panicked: transport exploded");
}

#[tokio::test]
async fn test_attempt_timeout_resolves_to_failure() {
    let client = MessagesClient::builder("test-key")
        .transport(Hanging)
        .attempt_timeout(Duration::from_millis(50))
        .build()
        .expect("client should build");

    let result = client.create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.kind, FailureKind::TransportFailure);
    assert_eq!(err.resolved_message(), "Request timed out after 50 ms");
}
