//! The request engine: one authenticated HTTP call per [`Endpoint`], classified into a typed
//! outcome.

use crate::config::GatewayConfig;
use crate::endpoint::{Endpoint, QueryParams};
use crate::error::CallError;
use crate::redact::sanitize_reqwest_error;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Header carrying the static API key on every request.
pub const API_KEY_HEADER: &str = "apikey";

/// Anything that can execute endpoint descriptors against the gateway.
///
/// Tool adapters depend on this rather than on [`GatewayClient`] so they can be exercised with
/// in-memory doubles.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Instance identifier interpolated into endpoint paths.
    fn instance(&self) -> &str;

    /// Execute one call and return the decoded JSON body.
    async fn call(&self, endpoint: Endpoint) -> Result<Value, CallError>;
}

#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    /// Build a client for the given credentials.
    ///
    /// No extra timeout is configured; the transport's own behavior applies.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            inner: Arc::new(GatewayClientInner {
                config,
                client: Client::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Execute `endpoint` and decode a successful response into `T`.
    ///
    /// Never panics and never returns early through anything but the typed outcome: non-2xx
    /// statuses and transport failures both come back as [`CallError`].
    ///
    /// # Errors
    ///
    /// - [`CallError::RateLimited`] on 429 (body ignored)
    /// - [`CallError::Gateway`] on any other non-2xx status
    /// - [`CallError::Transport`] if the request cannot be completed
    /// - [`CallError::Decode`] if a 2xx body does not decode into `T`
    pub async fn call<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, CallError> {
        let config = &self.inner.config;
        let url = build_url(config.base_url(), &endpoint.path, &endpoint.query)?;

        let mut request = self
            .inner
            .client
            .request(endpoint.method.clone(), url)
            .header(API_KEY_HEADER, config.api_key());
        if let Some(body) = &endpoint.body {
            // Also sets `Content-Type: application/json`.
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(
            method = %endpoint.method,
            path = %endpoint.path,
            status = status.as_u16(),
            "gateway call completed"
        );

        // Neither outcome depends on the body, so skip reading it.
        if status == StatusCode::NO_CONTENT || status == StatusCode::TOO_MANY_REQUESTS {
            return classify(status, &[]);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        classify(status, &bytes)
    }
}

#[async_trait]
impl Gateway for GatewayClient {
    fn instance(&self) -> &str {
        self.inner.config.instance()
    }

    async fn call(&self, endpoint: Endpoint) -> Result<Value, CallError> {
        GatewayClient::call::<Value>(self, &endpoint).await
    }
}

fn transport_error(e: reqwest::Error) -> CallError {
    CallError::Transport(sanitize_reqwest_error(&e))
}

fn build_url(base_url: &str, path: &str, query: &QueryParams) -> Result<Url, CallError> {
    let mut url = Url::parse(&format!("{base_url}{path}"))
        .map_err(|e| CallError::Transport(format!("invalid request URL: {e}")))?;

    let mut present = query.present().peekable();
    if present.peek().is_some() {
        url.query_pairs_mut().extend_pairs(present);
    }
    Ok(url)
}

/// Classify a fully-read response.
fn classify<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, CallError> {
    if status == StatusCode::NO_CONTENT {
        return decode_empty(status);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CallError::RateLimited);
    }
    if !status.is_success() {
        let message = error_detail(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        return Err(CallError::Gateway {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(body).map_err(|e| CallError::Decode {
        status: status.as_u16(),
        message: e.to_string(),
    })
}

fn decode_empty<T: DeserializeOwned>(status: StatusCode) -> Result<T, CallError> {
    serde_json::from_value(Value::Object(Map::new())).map_err(|e| CallError::Decode {
        status: status.as_u16(),
        message: e.to_string(),
    })
}

/// Best-effort detail from an error body: `message`, then `error`. Unparsable bodies have none.
fn error_detail(body: &[u8]) -> Option<String> {
    let v: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| v.get(key).and_then(detail_text))
}

fn detail_text(v: &Value) -> Option<String> {
    match v {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(|i| match i {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
