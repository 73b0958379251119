//! Result classification through a real HTTP round trip.

use anthropic_messages::{ConversationMessage, FailureKind, GenerationRequest, OperationResult};
use mockito::Matcher;
use serde_json::json;

use crate::mock_server::{sample_request, MockServerFixture, SUCCESS_BODY};

#[tokio::test]
async fn test_success_returns_first_block_text() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_messages(200, SUCCESS_BODY).await;
    let client = fixture.client();

    let result = client.create_message(&sample_request()).await;
    mock.assert_async().await;

    match result {
        OperationResult::Success(resp) => {
            assert_eq!(resp.text(), Some("Photosynthesis turns light into sugar!"));
            assert_eq!(resp.id.as_deref(), Some("msg_013Zva2CMHLNnXjNJJKqJ2EF"));
            assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
            let usage = resp.usage.expect("usage");
            assert_eq!(usage.input_tokens, Some(31));
            assert_eq!(usage.output_tokens, Some(12));
        }
        OperationResult::Failure(err) => panic!("expected success, got {err:?}"),
    }
}

#[tokio::test]
async fn test_success_tolerates_unknown_fields() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_messages(
            200,
            r#"{
                "id": "msg_1",
                "content": [{"type": "text", "text": "ok", "citations": null}],
                "container": null,
                "usage": {"input_tokens": 1, "output_tokens": 2, "service_tier": "standard"}
            }"#,
        )
        .await;

    let result = fixture.client().create_message(&sample_request()).await;
    let resp = result.success().expect("success");
    assert_eq!(resp.text(), Some("ok"));
    assert_eq!(resp.id.as_deref(), Some("msg_1"));
    assert_eq!(resp.model, None);
    assert_eq!(resp.usage.and_then(|u| u.total_tokens()), Some(3));
}

#[tokio::test]
async fn test_request_body_shape() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_messages_matching(
            json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 64,
                "temperature": 0.5,
                "messages": [
                    {"role": "user", "content": "one"},
                    {"role": "assistant", "content": "two"},
                    {"role": "user", "content": "three"}
                ]
            }),
            200,
            SUCCESS_BODY,
        )
        .await;

    let request = GenerationRequest::new("claude-3-haiku-20240307", 64)
        .messages([
            ConversationMessage::user("one"),
            ConversationMessage::assistant("two"),
            ConversationMessage::user("three"),
        ])
        .temperature(0.5);

    let result = fixture.client().create_message(&request).await;
    mock.assert_async().await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_top_level_error_message() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_messages(
            400,
            r#"{"type":"invalid_request_error","message":"max_tokens too large"}"#,
        )
        .await;

    let result = fixture.client().create_message(&sample_request()).await;
    match result {
        OperationResult::Failure(err) => {
            assert_eq!(err.resolved_message(), "max_tokens too large");
            assert_eq!(err.resolved_type(), Some("invalid_request_error"));
            assert_eq!(err.kind, FailureKind::RemoteRejection);
            assert_eq!(err.status, Some(400));
        }
        OperationResult::Success(resp) => panic!("expected failure, got {resp:?}"),
    }
}

#[tokio::test]
async fn test_nested_error_message() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_messages(400, r#"{"error":{"type":"x","message":"nested msg"}}"#)
        .await;

    let result = fixture.client().create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.message, None);
    assert_eq!(err.resolved_message(), "nested msg");
}

#[tokio::test]
async fn test_auth_error_without_message_falls_back() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_messages(401, r#"{"type":"error","error":{"type":"authentication_error"}}"#)
        .await;

    let result = fixture.client().create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.resolved_message(), "Unknown error");
    assert_eq!(err.resolved_type(), Some("error"));
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn test_unparseable_success_body() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_messages(200, "this is not json").await;

    let result = fixture.client().create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert_eq!(err.status, Some(200));
    assert!(!err.resolved_message().is_empty());
    assert!(err.resolved_message().contains("HTTP 200"));
}

#[tokio::test]
async fn test_unparseable_error_body() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_messages(502, "<html><body>Bad Gateway</body></html>")
        .await;

    let result = fixture.client().create_message(&sample_request()).await;
    let err = result.failure().expect("failure");
    assert_eq!(err.kind, FailureKind::MalformedErrorBody);
    assert_eq!(err.status, Some(502));
    assert_eq!(
        err.resolved_message(),
        "HTTP 502: <html><body>Bad Gateway</body></html>"
    );
}

#[tokio::test]
async fn test_concurrent_calls_resolve_independently() {
    let mut fixture = MockServerFixture::new().await;
    let ok = fixture
        .server
        .mock("POST", "/messages")
        .match_body(Matcher::PartialJson(json!({"model": "good"})))
        .with_status(200)
        .with_body(SUCCESS_BODY)
        .expect(4)
        .create_async()
        .await;
    let bad = fixture
        .server
        .mock("POST", "/messages")
        .match_body(Matcher::PartialJson(json!({"model": "bad"})))
        .with_status(404)
        .with_body(r#"{"type":"error","error":{"type":"not_found_error","message":"model: bad"}}"#)
        .expect(4)
        .create_async()
        .await;

    let client = std::sync::Arc::new(fixture.client());
    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        let model = if i % 2 == 0 { "good" } else { "bad" };
        handles.push(tokio::spawn(async move {
            let request =
                GenerationRequest::new(model, 16).message(ConversationMessage::user("hi"));
            (model, client.create_message(&request).await)
        }));
    }

    for handle in handles {
        let (model, result) = handle.await.expect("task should not panic");
        match (model, result) {
            ("good", OperationResult::Success(resp)) => assert!(resp.text().is_some()),
            ("bad", OperationResult::Failure(err)) => {
                assert_eq!(err.resolved_message(), "model: bad")
            }
            (model, other) => panic!("unexpected outcome for {model}: {other:?}"),
        }
    }

    ok.assert_async().await;
    bad.assert_async().await;
}
