//! The two-variant outcome of a call.

use super::error::ApiErrorEnvelope;
use super::response::GenerationResponse;

/// Outcome of [`MessagesClient::create_message`](crate::MessagesClient::create_message).
///
/// Every path through a call resolves to exactly one of these variants,
/// including transport failures and use after close.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success(GenerationResponse),
    Failure(ApiErrorEnvelope),
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn success(&self) -> Option<&GenerationResponse> {
        match self {
            OperationResult::Success(resp) => Some(resp),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiErrorEnvelope> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<GenerationResponse, ApiErrorEnvelope> {
        self.into()
    }
}

impl From<OperationResult> for Result<GenerationResponse, ApiErrorEnvelope> {
    fn from(value: OperationResult) -> Self {
        match value {
            OperationResult::Success(resp) => Ok(resp),
            OperationResult::Failure(err) => Err(err),
        }
    }
}

impl From<Result<GenerationResponse, ApiErrorEnvelope>> for OperationResult {
    fn from(value: Result<GenerationResponse, ApiErrorEnvelope>) -> Self {
        match value {
            Ok(resp) => OperationResult::Success(resp),
            Err(err) => OperationResult::Failure(err),
        }
    }
}
