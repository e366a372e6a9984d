//! MCP tool annotations for gateway-backed tools.
//!
//! Hints are declared per tool rather than derived from the HTTP method: several read-only
//! gateway queries are POSTs (`findContacts`, `findMessages`, `whatsappNumbers`).

use rmcp::model::ToolAnnotations;

/// What a tool does to remote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ReadOnly,
    /// Changes remote state (sends a message, marks as read).
    Mutating,
    /// Irreversibly removes remote state.
    Destructive,
}

/// Build annotations for a tool.
///
/// `openWorldHint` is always `true`: every tool talks to the external gateway. Idempotence is
/// left unset.
#[must_use]
pub fn annotations_for(title: &str, effect: Effect) -> ToolAnnotations {
    let (read_only, destructive) = match effect {
        Effect::ReadOnly => (true, false),
        Effect::Mutating => (false, false),
        Effect::Destructive => (false, true),
    };

    ToolAnnotations {
        title: Some(title.to_string()),
        read_only_hint: Some(read_only),
        destructive_hint: Some(destructive),
        idempotent_hint: None,
        open_world_hint: Some(true),
    }
}
