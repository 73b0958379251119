//! Wire schema for the Messages API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConversationMessage`] | One role-tagged turn |
//! | [`GenerationRequest`] | Outbound request body |
//! | [`GenerationResponse`] | Success body (all fields optional) |
//! | [`ApiErrorEnvelope`] | Error body, top-level or nested |
//! | [`OperationResult`] | `Success` or `Failure`, nothing else |
//!
//! ## Example
//!
//! ```rust
//! use anthropic_messages::types::{ConversationMessage, GenerationRequest};
//!
//! let request = GenerationRequest::new("claude-3-sonnet-20240229", 500)
//!     .message(ConversationMessage::user("Explain photosynthesis"))
//!     .system("You are a helpful scientist");
//!
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["messages"][0]["role"], "user");
//! assert!(body.get("temperature").is_none());
//! ```

pub mod error;
pub mod message;
pub mod request;
pub mod response;
pub mod result;

pub use error::{ApiErrorEnvelope, ErrorDetail, FailureKind};
pub use message::{ConversationMessage, Role};
pub use request::GenerationRequest;
pub use response::{ContentBlock, GenerationResponse, UsageSummary};
pub use result::OperationResult;
