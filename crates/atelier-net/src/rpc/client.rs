//! JSON-RPC over HTTP client implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use atelier_core::logging::{span_names, targets};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;

use super::envelope::{RpcRequest, RpcResponse};
use super::remote::RemoteCall;
use crate::error::{Result, RpcError};

/// Configuration for the JSON-RPC client.
///
/// Deserializable so a host can embed it in its own settings file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RpcClientConfig {
    /// Origin the endpoint paths are appended to.
    pub base_url: String,
    /// Request timeout.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
    /// Connect timeout.
    #[serde(with = "optional_secs")]
    pub connect_timeout: Option<Duration>,
    /// Whether to keep session cookies between calls.
    pub cookies_enabled: bool,
    /// User agent sent with every call.
    pub user_agent: Option<String>,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            cookies_enabled: true,
            user_agent: Some(format!("Atelier/{} (Rust)", env!("CARGO_PKG_VERSION"))),
        }
    }
}

mod optional_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<f64>::deserialize(d)?
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64))
    }
}

/// Builder for creating a JSON-RPC client with custom configuration.
pub struct JsonRpcClientBuilder {
    config: RpcClientConfig,
}

impl JsonRpcClientBuilder {
    /// Create a builder for the given origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: RpcClientConfig {
                base_url: base_url.into(),
                ..RpcClientConfig::default()
            },
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: RpcClientConfig) -> Self {
        Self { config }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable cookie storage.
    pub fn no_cookies(mut self) -> Self {
        self.config.cookies_enabled = false;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(mut self) -> Result<JsonRpcClient> {
        let parsed = url::Url::parse(&self.config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RpcError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        self.config.base_url = self.config.base_url.trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if self.config.cookies_enabled {
            builder = builder.cookie_store(true);
        }
        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }

        let client = builder.build()?;

        Ok(JsonRpcClient {
            inner: Arc::new(JsonRpcClientInner {
                client,
                config: self.config,
                next_id: AtomicU64::new(1),
            }),
        })
    }
}

struct JsonRpcClientInner {
    client: reqwest::Client,
    config: RpcClientConfig,
    next_id: AtomicU64,
}

/// A client for the storefront's JSON routes.
///
/// Every call is a `POST` of a JSON-RPC 2.0 envelope to `base_url + endpoint`.
/// The client is cheaply cloneable; clones share the connection pool, the
/// cookie jar and the request id counter.
///
/// # Example
///
/// ```ignore
/// use atelier_net::{JsonRpcClient, RemoteCall};
///
/// let client = JsonRpcClient::builder("https://shop.example.com")
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// let categories = client.call("/public_categories/", serde_json::json!({})).await?;
/// ```
#[derive(Clone)]
pub struct JsonRpcClient {
    inner: Arc<JsonRpcClientInner>,
}

impl JsonRpcClient {
    /// Create a builder for the given origin.
    pub fn builder(base_url: impl Into<String>) -> JsonRpcClientBuilder {
        JsonRpcClientBuilder::new(base_url)
    }

    /// Create a client with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &RpcClientConfig {
        &self.inner.config
    }

    /// The normalized origin (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Full URL a given endpoint resolves to.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url(), endpoint)
        } else {
            format!("{}/{}", self.base_url(), endpoint)
        }
    }

    async fn perform(&self, endpoint: &str, payload: Value) -> Result<Value> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::call(&payload, id);
        let url = self.endpoint_url(endpoint);

        tracing::debug!(target: targets::RPC, %url, id = request.id(), "sending call");

        let response = self.inner.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = status.canonical_reason().map(str::to_string);
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let envelope: RpcResponse = serde_json::from_slice(&body)?;
        let result = envelope.into_result();

        match &result {
            Ok(_) => tracing::trace!(target: targets::RPC, id, "call resolved"),
            Err(err) => tracing::debug!(target: targets::RPC, id, error = %err, "call rejected"),
        }
        result
    }
}

impl RemoteCall for JsonRpcClient {
    fn call<'a>(&'a self, endpoint: &'a str, payload: Value) -> BoxFuture<'a, Result<Value>> {
        let span = tracing::debug_span!(span_names::REMOTE_CALL, endpoint);
        self.perform(endpoint, payload).instrument(span).boxed()
    }
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("base_url", &self.inner.config.base_url)
            .field("config", &self.inner.config)
            .finish()
    }
}
