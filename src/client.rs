//! Messages API client.
//!
//! The public surface is one call plus a lifecycle: build a
//! [`MessagesClient`], call [`MessagesClient::create_message`] as often as
//! needed, then [`MessagesClient::close`].

pub mod builder;
mod classification;
pub mod core;

pub use builder::{MessagesClientBuilder, ANTHROPIC_API_VERSION, DEFAULT_BASE_URL};
pub use self::core::MessagesClient;
