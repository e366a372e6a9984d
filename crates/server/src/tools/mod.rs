//! The tool catalog: one [`ToolSpec`] record per gateway operation.
//!
//! A record carries everything the host needs (name, title, description, input schema,
//! annotations) plus a pure `build` function mapping validated arguments to the single
//! [`Endpoint`] the operation calls. Records are grouped by gateway category:
//! - [`messaging`]: `/message/*` senders
//! - [`chat`]: `/chat/*` contact and message queries
//! - [`groups`]: `/group/*` queries and the `/instance/*` connection check

pub mod chat;
pub mod groups;
pub mod messaging;

use crate::annotations::Effect;
use evolution_gateway_client::Endpoint;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// Maps validated arguments and the instance identifier to an endpoint.
pub type BuildFn = fn(&Map<String, Value>, &str) -> Result<Endpoint, serde_json::Error>;

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub effect: Effect,
    /// Prefix of the error envelope text, e.g. `Failed to send text message`.
    pub failure: &'static str,
    pub input_schema: fn() -> Value,
    pub build: BuildFn,
}

/// Every tool this server exposes, in listing order.
#[must_use]
pub fn all() -> Vec<ToolSpec> {
    let mut out = messaging::tools();
    out.extend(chat::tools());
    out.extend(groups::tools());
    out
}

/// Deserialize already-validated arguments into a tool's typed input.
pub(crate) fn parse<A: DeserializeOwned>(
    args: &Map<String, Value>,
) -> Result<A, serde_json::Error> {
    serde_json::from_value(Value::Object(args.clone()))
}

/// JSON object body where optional fields are only ever present with a value.
#[derive(Debug, Default)]
pub(crate) struct Payload(Map<String, Value>);

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn optional(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Like [`Payload::optional`], but an empty string counts as absent.
    pub(crate) fn non_empty(self, key: &str, value: Option<String>) -> Self {
        self.optional(key, value.filter(|s| !s.is_empty()))
    }

    pub(crate) fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// `{"type":"object", "properties": ..., "required": [...]}`.
pub(crate) fn object_schema(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

pub(crate) fn phone_number_prop() -> Value {
    json!({
        "type": "string",
        "description": "Recipient phone number with country code, no + (e.g. 5538999999999)"
    })
}

pub(crate) fn delay_prop(what: &str) -> Value {
    json!({
        "type": "number",
        "description": format!("{what} simulation delay in milliseconds before sending")
    })
}

pub(crate) fn jid_prop(example: &str) -> Value {
    json!({
        "type": "string",
        "description": format!("Chat JID (e.g. {example})")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_sixteen_uniquely_named_tools() {
        let tools = all();
        assert_eq!(tools.len(), 16);
        let names: HashSet<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn every_schema_is_an_object_schema() {
        for t in all() {
            let schema = (t.input_schema)();
            assert_eq!(schema["type"], "object", "tool {}", t.name);
            assert!(schema["properties"].is_object(), "tool {}", t.name);
            assert!(t.failure.starts_with("Failed to "), "tool {}", t.name);
        }
    }

    #[test]
    fn payload_skips_absent_and_empty_optionals() {
        let body = Payload::new()
            .field("number", "551")
            .optional("delay", None::<u64>)
            .optional("linkPreview", Some(false))
            .non_empty("caption", Some(String::new()))
            .non_empty("fileName", Some("a.pdf".to_string()))
            .into_map();
        assert_eq!(
            Value::Object(body),
            json!({"number": "551", "linkPreview": false, "fileName": "a.pdf"})
        );
    }
}
