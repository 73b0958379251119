use super::{Transport, TransportError, TransportRequest, TransportResponse};
use crate::error::{Error, ErrorContext};
use crate::Result;
use async_trait::async_trait;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Settings for the default reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

impl HttpTransportConfig {
    /// Defaults with env overrides:
    /// - `ANTHROPIC_HTTP_TIMEOUT_SECS`
    /// - `ANTHROPIC_HTTP_POOL_MAX_IDLE_PER_HOST`
    /// - `ANTHROPIC_PROXY_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: positive_env("ANTHROPIC_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: env::var("ANTHROPIC_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: defaults.pool_idle_timeout,
            proxy_url: env::var("ANTHROPIC_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Reads `name` as a strictly positive integer; zero and junk count as unset.
pub(crate) fn positive_env(name: &str) -> Option<u64> {
    env::var(name).ok().as_deref().and_then(parse_positive)
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

/// Pooled HTTPS transport. Cloning the inner `reqwest::Client` is cheap and
/// all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpTransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(proxy_url.clone())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method, &request.url)
            .body(request.body);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
