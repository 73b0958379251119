//! HTTP transport seam.
//!
//! The client only needs "send a request, get status + headers + body back".
//! [`HttpTransport`] does that over a pooled `reqwest::Client`; tests and
//! embedders can plug in their own [`Transport`].

pub(crate) mod http;

pub use http::{HttpTransport, HttpTransportConfig};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;

const REQUEST_ID_HEADER: &str = "request-id";

/// A fully-formed outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: reqwest::Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// Raw response as received. Any status, including non-2xx, is a response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-assigned `request-id` header, if present.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request. Implementations must be safe to share across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}
