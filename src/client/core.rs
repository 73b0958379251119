use crate::error::Error;
use crate::transport::{Transport, TransportError, TransportRequest};
use crate::types::{GenerationRequest, OperationResult};
use crate::Result;
use arc_swap::ArcSwapOption;
use bytes::Bytes;
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::classification::classify;

const NO_TIMER_MESSAGE: &str = "attempt timeout requires a Tokio runtime with timers enabled";

/// Client for `POST {base_url}/messages`.
///
/// One client owns one transport handle (a pooled HTTP client) and may be
/// shared across tasks; calls are independent of each other. [`close`]
/// releases the handle, after which every call fails immediately.
///
/// [`close`]: MessagesClient::close
pub struct MessagesClient {
    pub(crate) transport: ArcSwapOption<Box<dyn Transport>>,
    pub(crate) endpoint: String,
    pub(crate) api_key: String,
    pub(crate) api_version: String,
    pub(crate) attempt_timeout: Option<Duration>,
}

impl fmt::Debug for MessagesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagesClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("attempt_timeout", &self.attempt_timeout)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl MessagesClient {
    /// Client with default settings for the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        crate::client::builder::MessagesClientBuilder::new(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> crate::client::builder::MessagesClientBuilder {
        crate::client::builder::MessagesClientBuilder::new(api_key)
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one request.
    ///
    /// Never returns an error and never panics on a failed call: transport
    /// failures, undecodable bodies, timeouts and use after [`close`] all come
    /// back as [`OperationResult::Failure`].
    ///
    /// [`close`]: MessagesClient::close
    pub async fn create_message(&self, request: &GenerationRequest) -> OperationResult {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let mut upstream_request_id = None;
        let result = match self
            .execute_once(request, &request_id, &mut upstream_request_id)
            .await
        {
            Ok(result) => result,
            Err(e) => OperationResult::Failure(e.into_envelope()),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            OperationResult::Success(resp) => debug!(
                request_id = request_id.as_str(),
                model = resp.model.as_deref().unwrap_or(""),
                stop_reason = resp.stop_reason.as_deref().unwrap_or(""),
                duration_ms,
                "messages request succeeded"
            ),
            OperationResult::Failure(err) => info!(
                request_id = request_id.as_str(),
                upstream_request_id = upstream_request_id.as_deref().unwrap_or(""),
                http_status = err.status,
                failure_kind = err.kind.as_str(),
                error_type = err.resolved_type().unwrap_or(""),
                duration_ms,
                "messages request failed: {}",
                err.resolved_message()
            ),
        }

        result
    }

    /// Single attempt: serialize, send, classify. Records the server's
    /// `request-id` header in `upstream_request_id` once a response arrives.
    async fn execute_once(
        &self,
        request: &GenerationRequest,
        request_id: &str,
        upstream_request_id: &mut Option<String>,
    ) -> Result<OperationResult> {
        // Snapshot the handle so a concurrent close() cannot pull it out mid-call.
        let transport = self.transport.load_full().ok_or(Error::Closed)?;

        let body = serde_json::to_vec(request)?;
        let outbound = TransportRequest {
            method: reqwest::Method::POST,
            url: self.endpoint.clone(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("x-api-key".to_string(), self.api_key.clone()),
                ("anthropic-version".to_string(), self.api_version.clone()),
            ],
            body: Bytes::from(body),
        };

        debug!(
            request_id,
            endpoint = self.endpoint.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "sending messages request"
        );

        let send = AssertUnwindSafe(transport.send(outbound)).catch_unwind();
        let sent = match self.attempt_timeout {
            Some(limit) => {
                // The timer panics without a Tokio runtime, or with timers disabled.
                let timed = match tokio::runtime::Handle::try_current() {
                    Ok(_) => std::panic::catch_unwind(AssertUnwindSafe(|| {
                        tokio::time::timeout(limit, send)
                    }))
                    .ok(),
                    Err(_) => None,
                };
                let timed = timed
                    .ok_or_else(|| TransportError::Other(NO_TIMER_MESSAGE.to_string()))?;
                timed.await.map_err(|_| Error::Timeout {
                    elapsed_ms: limit.as_millis(),
                })?
            }
            None => send.await,
        };
        let response = sent.map_err(|payload| TransportError::Panicked(panic_message(payload)))??;

        *upstream_request_id = response.request_id().map(str::to_string);
        debug!(
            request_id,
            upstream_request_id = upstream_request_id.as_deref().unwrap_or(""),
            http_status = response.status,
            bytes = response.body.len(),
            "messages response received"
        );

        classify(&response)
    }

    /// Release the transport handle.
    ///
    /// Returns `true` if this call released it and `false` if the client was
    /// already closed. Calls already in flight finish on their own snapshot.
    pub fn close(&self) -> bool {
        let released = self.transport.swap(None).is_some();
        if released {
            debug!(endpoint = self.endpoint.as_str(), "messages client closed");
        } else {
            debug!(
                endpoint = self.endpoint.as_str(),
                "close() on an already closed messages client"
            );
        }
        released
    }

    pub fn is_closed(&self) -> bool {
        self.transport.load().is_none()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// Compile-time check: one client is shareable across tasks.
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MessagesClient>();
    assert_send_sync::<Arc<MessagesClient>>();
};
