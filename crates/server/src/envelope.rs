//! The two tool-result shapes every tool call returns.
//!
//! Success: `{content: [{type: "text", text: <pretty JSON>}]}` with no `isError` key.
//! Failure: `{isError: true, content: [{type: "text", text: <message>}]}`.

use evolution_gateway_client::CallError;
use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Success envelope: the outcome value as two-space-indented JSON text.
#[must_use]
pub fn tool_result(value: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: None,
        is_error: None,
        meta: None,
    }
}

#[must_use]
pub fn tool_error(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Convert one gateway call outcome into an envelope.
///
/// `failure` is the tool's prefix, e.g. `Failed to send poll`.
#[must_use]
pub fn from_outcome(
    tool: &str,
    failure: &str,
    outcome: Result<Value, CallError>,
) -> CallToolResult {
    let err = match outcome {
        Ok(value) => return tool_result(&value),
        Err(err) => err,
    };

    match &err {
        CallError::RateLimited => {
            tracing::warn!(
                tool = %tool,
                kind = err.kind().as_str(),
                status = 429,
                "gateway rate limited"
            );
        }
        CallError::Gateway { status, .. } | CallError::Decode { status, .. } => {
            tracing::warn!(
                tool = %tool,
                kind = err.kind().as_str(),
                status = *status,
                error = %err,
                "gateway call failed"
            );
        }
        CallError::Transport(_) => {
            tracing::warn!(
                tool = %tool,
                kind = err.kind().as_str(),
                error = %err,
                "gateway unreachable"
            );
        }
    }

    tool_error(format!("{failure}: {err}"))
}
