use crate::client::core::MessagesClient;
use crate::error::{Error, ErrorContext};
use crate::transport::http::positive_env;
use crate::transport::{HttpTransport, HttpTransportConfig, Transport};
use crate::Result;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::time::Duration;

/// Default API root. Requests go to `{base_url}/messages`.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/messages";

/// Builder for [`MessagesClient`].
///
/// Keep this surface area small: credentials, where to send, and how long
/// to wait. Transport defaults can also be set through env, see
/// [`HttpTransportConfig::from_env`].
pub struct MessagesClientBuilder {
    api_key: String,
    base_url: String,
    api_version: String,
    http: HttpTransportConfig,
    attempt_timeout: Option<Duration>,
    transport: Option<Box<dyn Transport>>,
}

impl MessagesClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        // Optional per-attempt guard on top of the transport's own timeout.
        let attempt_timeout = positive_env("ANTHROPIC_ATTEMPT_TIMEOUT_MS").map(Duration::from_millis);

        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: ANTHROPIC_API_VERSION.to_string(),
            http: HttpTransportConfig::from_env(),
            attempt_timeout,
            transport: None,
        }
    }

    /// Read `ANTHROPIC_API_KEY` (required) and `ANTHROPIC_BASE_URL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key not set",
                    ErrorContext::new()
                        .with_field_path("ANTHROPIC_API_KEY")
                        .with_source("client_builder"),
                )
            })?;

        let mut builder = Self::new(api_key);
        if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
            if !base_url.trim().is_empty() {
                builder = builder.base_url(base_url);
            }
        }
        Ok(builder)
    }

    /// API root, e.g. `https://api.anthropic.com/v1`. A trailing `/` is ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Transport-level request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Outer limit on one call, enforced with `tokio::time::timeout`.
    /// Exceeding it resolves the call to a failure, and so does calling
    /// outside a Tokio runtime with timers enabled.
    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.http.pool_max_idle_per_host = n;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.http.proxy_url = Some(proxy_url.into());
        self
    }

    /// Replace the default reqwest transport.
    ///
    /// Primarily for tests and for embedders that already own an HTTP stack.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MessagesClient> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url.clone())
                    .with_source("client_builder"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported URL scheme '{}'", parsed.scheme()),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url)
                    .with_source("client_builder"),
            ));
        }

        let transport: Box<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&self.http)?),
        };

        Ok(MessagesClient {
            transport: ArcSwapOption::new(Some(Arc::new(transport))),
            endpoint: format!("{}{}", base_url, MESSAGES_PATH),
            api_key: self.api_key,
            api_version: self.api_version,
            attempt_timeout: self.attempt_timeout,
        })
    }
}
