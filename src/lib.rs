//! # anthropic-messages
//!
//! Typed client for the Anthropic Messages API.
//!
//! ## Overview
//!
//! A call builds a [`GenerationRequest`], posts it to `{base_url}/messages`
//! and classifies whatever comes back into an [`OperationResult`]:
//!
//! - `Success(GenerationResponse)` for a 2xx body that decodes.
//! - `Failure(ApiErrorEnvelope)` for everything else: an error reported by
//!   the API, a body that does not decode, a transport failure, a timeout, or
//!   a call on a closed client.
//!
//! Nothing escapes [`MessagesClient::create_message`] as an error or panic;
//! callers match on two variants and nothing else. Use
//! [`ApiErrorEnvelope::resolved_message`] to get a non-empty message out of a
//! failure.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anthropic_messages::{
//!     ConversationMessage, GenerationRequest, MessagesClient, OperationResult,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anthropic_messages::Result<()> {
//!     let client = MessagesClient::new("your-api-key")?;
//!
//!     let request = GenerationRequest::new("claude-3-sonnet-20240229", 500)
//!         .message(ConversationMessage::user("Explain photosynthesis briefly."))
//!         .system("You are a helpful scientist");
//!
//!     match client.create_message(&request).await {
//!         OperationResult::Success(resp) => println!("{}", resp.text().unwrap_or_default()),
//!         OperationResult::Failure(err) => eprintln!("Error: {}", err.resolved_message()),
//!     }
//!
//!     client.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Request, response, error envelope and result types |
//! | [`client`] | Client, builder and result classification |
//! | [`transport`] | HTTP transport trait and the reqwest implementation |
//! | [`error`] | Failure taxonomy folded into `Failure` at the client boundary |
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod client;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{MessagesClient, MessagesClientBuilder};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{
    ApiErrorEnvelope, ContentBlock, ConversationMessage, ErrorDetail, FailureKind,
    GenerationRequest, GenerationResponse, OperationResult, Role, UsageSummary,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
