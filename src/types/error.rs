//! Error envelope returned by the API, also used for locally synthesized failures.

use serde::{Deserialize, Serialize};

/// Resolved message when an envelope carries no message at all.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

/// Which branch of the failure taxonomy produced an envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The API answered with a non-2xx status and a parseable error body.
    #[default]
    RemoteRejection,
    /// 2xx status, but the body did not match the success schema.
    MalformedResponse,
    /// Non-2xx status, and the error body did not parse either.
    MalformedErrorBody,
    /// The call never completed: connect failure, timeout, encoding failure.
    TransportFailure,
    /// The client was closed before the call started.
    Closed,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RemoteRejection => "remote_rejection",
            FailureKind::MalformedResponse => "malformed_response",
            FailureKind::MalformedErrorBody => "malformed_error_body",
            FailureKind::TransportFailure => "transport_failure",
            FailureKind::Closed => "closed",
        }
    }
}

/// Error body. The API reports errors either at the top level
/// (`{"type", "message"}`) or nested (`{"error": {"type", "message"}}`);
/// both shapes parse into this one struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    /// Local only. Envelopes decoded from a response body are remote rejections.
    #[serde(skip)]
    pub kind: FailureKind,
    /// Local only. HTTP status, when a response was received.
    #[serde(skip)]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorEnvelope {
    /// Top-level message, else nested message, else [`FALLBACK_ERROR_MESSAGE`].
    ///
    /// Blank strings count as absent, so the result is never empty.
    pub fn resolved_message(&self) -> &str {
        non_blank(self.message.as_deref())
            .or_else(|| non_blank(self.error.as_ref()?.message.as_deref()))
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
    }

    /// Top-level type, else nested type.
    pub fn resolved_type(&self) -> Option<&str> {
        non_blank(self.error_type.as_deref())
            .or_else(|| non_blank(self.error.as_ref()?.error_type.as_deref()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
