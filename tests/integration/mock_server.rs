//! Mock HTTP server setup for integration tests

use anthropic_messages::{ConversationMessage, GenerationRequest, MessagesClient};
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const TEST_API_KEY: &str = "test-key";

/// Test fixture that owns a mock server and points a client at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client whose base URL is the mock server.
    pub fn client(&self) -> MessagesClient {
        MessagesClient::builder(TEST_API_KEY)
            .base_url(&self.base_url)
            .build()
            .expect("client should build")
    }

    /// Mock `POST /messages` answering with `status` and `body`, and only
    /// matching when the required headers are present.
    pub async fn mock_messages(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/messages")
            .match_header("x-api-key", TEST_API_KEY)
            .match_header("anthropic-version", "2023-06-01")
            .match_header("content-type", "application/json")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock that also checks part of the request body.
    pub async fn mock_messages_matching(
        &mut self,
        expected_body: serde_json::Value,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock("POST", "/messages")
            .match_body(Matcher::PartialJson(expected_body))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new("claude-3-sonnet-20240229", 500)
        .message(ConversationMessage::user(
            "Explain the concept of photosynthesis in a concise paragraph.",
        ))
        .system("You are a helpful and excited scientist respond with enthusiasm")
}

pub const SUCCESS_BODY: &str = r#"{
    "id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
    "type": "message",
    "role": "assistant",
    "model": "claude-3-sonnet-20240229",
    "content": [{"type": "text", "text": "Photosynthesis turns light into sugar!"}],
    "stop_reason": "end_turn",
    "stop_sequence": null,
    "usage": {"input_tokens": 31, "output_tokens": 12}
}"#;
