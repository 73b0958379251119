use crate::transport::TransportError;
use crate::types::error::{ApiErrorEnvelope, FailureKind};
use thiserror::Error;

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Longest slice of a raw error body kept in a synthesized message.
const RAW_BODY_SNIPPET_CHARS: usize = 512;

/// Structured error context for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Setting that caused the error (e.g., "base_url", "ANTHROPIC_API_KEY")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Where the error was raised (e.g., "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Every way a call can go wrong before it is folded into
/// [`OperationResult::Failure`](crate::OperationResult::Failure).
///
/// Only the builder hands this type to callers; `create_message` converts it
/// with [`Error::into_envelope`] at the client boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed response body (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP {status}{}", format_body_snippet(.body))]
    MalformedErrorBody { status: u16, body: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Request timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u128 },

    #[error("client is closed")]
    Closed,
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_body_snippet(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let mut snippet: String = body.chars().take(RAW_BODY_SNIPPET_CHARS).collect();
    if body.chars().count() > RAW_BODY_SNIPPET_CHARS {
        snippet.push_str("...");
    }
    format!(": {}", snippet)
}

impl Error {
    /// Create a configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status attached to the failure, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::MalformedResponse { status, .. } | Error::MalformedErrorBody { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Where this error sits in the failure taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Error::MalformedErrorBody { .. } => FailureKind::MalformedErrorBody,
            Error::Closed => FailureKind::Closed,
            Error::Transport(_)
            | Error::Serialization(_)
            | Error::Configuration { .. }
            | Error::Timeout { .. } => FailureKind::TransportFailure,
        }
    }

    /// Synthesize the error envelope returned to callers.
    ///
    /// The message is this error's description, or [`UNKNOWN_ERROR_MESSAGE`]
    /// when the description is blank.
    pub fn into_envelope(self) -> ApiErrorEnvelope {
        let description = self.to_string();
        let message = if description.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            description
        };
        ApiErrorEnvelope {
            message: Some(message),
            kind: self.kind(),
            status: self.status(),
            ..ApiErrorEnvelope::default()
        }
    }
}
