//! Endpoint descriptors and the gateway's path grammar.

use reqwest::Method;
use serde_json::{Map, Value};

/// Ordered query parameters. Entries without a value (or with an empty one) are dropped when
/// the URL is built, so optional arguments can be passed through unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any earlier value for the same key in place.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let key = key.into();
        let value = value.map(Into::into);
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
        self
    }

    /// Parameters that survive filtering, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().filter_map(|(k, v)| match v.as_deref() {
            Some(v) if !v.is_empty() => Some((k.as_str(), v)),
            _ => None,
        })
    }
}

/// One logical gateway call: path (instance already interpolated), method, optional JSON body
/// and query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: Method,
    pub body: Option<Map<String, Value>>,
    pub query: QueryParams,
}

impl Endpoint {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            query: QueryParams::new(),
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    #[must_use]
    pub fn put(path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self::new(Method::DELETE, path).with_body(body)
    }

    #[must_use]
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

#[must_use]
pub fn message_path(action: &str, instance: &str) -> String {
    format!("/message/{action}/{instance}")
}

#[must_use]
pub fn chat_path(action: &str, instance: &str) -> String {
    format!("/chat/{action}/{instance}")
}

#[must_use]
pub fn group_path(action: &str, instance: &str) -> String {
    format!("/group/{action}/{instance}")
}

#[must_use]
pub fn instance_path(action: &str, instance: &str) -> String {
    format!("/instance/{action}/{instance}")
}
