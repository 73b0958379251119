//! Turns a raw HTTP response into a success or a failure.

use crate::error::Error;
use crate::transport::TransportResponse;
use crate::types::{ApiErrorEnvelope, FailureKind, GenerationResponse, OperationResult};
use crate::Result;

/// Classify a received response by status class.
///
/// - 2xx decodes the success schema; a body that does not fit is
///   [`Error::MalformedResponse`].
/// - anything else decodes the error envelope; a body that does not fit is
///   [`Error::MalformedErrorBody`] carrying the raw text.
pub(crate) fn classify(response: &TransportResponse) -> Result<OperationResult> {
    let status = response.status;

    if response.is_success() {
        let parsed: GenerationResponse = serde_json::from_slice(&response.body)
            .map_err(|source| Error::MalformedResponse { status, source })?;
        return Ok(OperationResult::Success(parsed));
    }

    let body = response.text();
    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(mut envelope) => {
            envelope.kind = FailureKind::RemoteRejection;
            envelope.status = Some(status);
            Ok(OperationResult::Failure(envelope))
        }
        Err(_) => Err(Error::MalformedErrorBody { status, body }),
    }
}
