//! Contact and message queries (`/chat/<action>/<instance>`).

use super::{Payload, ToolSpec, jid_prop, object_schema, parse};
use crate::annotations::Effect;
use evolution_gateway_client::Endpoint;
use evolution_gateway_client::endpoint::chat_path;
use serde::Deserialize;
use serde_json::{Number, Value, json};

/// Page size for `find_messages` when the caller gives none.
const DEFAULT_MESSAGE_LIMIT: u64 = 20;

pub(crate) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "find_contacts",
            title: "Find Contacts",
            description: "Search WhatsApp contacts. Returns all contacts if no filter is provided, or a specific contact by JID.",
            effect: Effect::ReadOnly,
            failure: "Failed to find contacts",
            input_schema: find_contacts_schema,
            build: |args, instance| Ok(find_contacts(parse(args)?, instance)),
        },
        ToolSpec {
            name: "check_whatsapp_numbers",
            title: "Check WhatsApp Numbers",
            description: "Verify if phone numbers are registered on WhatsApp. Returns which numbers exist and their JIDs.",
            effect: Effect::ReadOnly,
            failure: "Failed to check WhatsApp numbers",
            input_schema: check_numbers_schema,
            build: |args, instance| Ok(check_numbers(parse(args)?, instance)),
        },
        ToolSpec {
            name: "find_messages",
            title: "Find Messages",
            description: "Retrieve messages from a specific WhatsApp chat. Returns recent messages ordered by timestamp.",
            effect: Effect::ReadOnly,
            failure: "Failed to find messages",
            input_schema: find_messages_schema,
            build: |args, instance| Ok(find_messages(parse(args)?, instance)),
        },
        ToolSpec {
            name: "mark_as_read",
            title: "Mark Messages as Read",
            description: "Mark specific messages as read in a WhatsApp chat.",
            effect: Effect::Mutating,
            failure: "Failed to mark messages as read",
            input_schema: mark_as_read_schema,
            build: |args, instance| Ok(mark_as_read(parse(args)?, instance)),
        },
        ToolSpec {
            name: "delete_message",
            title: "Delete Message",
            description: "Delete a WhatsApp message for everyone in the chat. Only works for messages you sent within the time limit.",
            effect: Effect::Destructive,
            failure: "Failed to delete message",
            input_schema: delete_message_schema,
            build: |args, instance| Ok(delete_message(parse(args)?, instance)),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct FindContacts {
    filter_id: Option<String>,
}

fn find_contacts_schema() -> Value {
    object_schema(
        json!({
            "filter_id": {
                "type": "string",
                "description": "Optional JID to filter (e.g. 5538999999999@s.whatsapp.net). Omit to list all contacts."
            }
        }),
        &[],
    )
}

fn find_contacts(a: FindContacts, instance: &str) -> Endpoint {
    let filter = a.filter_id.filter(|id| !id.is_empty()).map(|id| json!({ "id": id }));
    let body = Payload::new().optional("where", filter);
    Endpoint::post(chat_path("findContacts", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct CheckNumbers {
    numbers: Vec<String>,
}

fn check_numbers_schema() -> Value {
    object_schema(
        json!({
            "numbers": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1,
                "description": "Phone numbers to check, with country code, no + (e.g. ['5538999999999'])"
            }
        }),
        &["numbers"],
    )
}

fn check_numbers(a: CheckNumbers, instance: &str) -> Endpoint {
    let body = Payload::new().field("numbers", a.numbers);
    Endpoint::post(chat_path("whatsappNumbers", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct FindMessages {
    remote_jid: String,
    limit: Option<Number>,
}

fn find_messages_schema() -> Value {
    object_schema(
        json!({
            "remote_jid": jid_prop("5538999999999@s.whatsapp.net or group JID"),
            "limit": {
                "type": "number",
                "description": "Maximum number of messages to return (default: 20)"
            }
        }),
        &["remote_jid"],
    )
}

fn find_messages(a: FindMessages, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("where", json!({ "key": { "remoteJid": a.remote_jid } }))
        .field(
            "limit",
            a.limit.unwrap_or_else(|| Number::from(DEFAULT_MESSAGE_LIMIT)),
        );
    Endpoint::post(chat_path("findMessages", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct MarkAsRead {
    remote_jid: String,
    message_ids: Vec<String>,
}

fn mark_as_read_schema() -> Value {
    object_schema(
        json!({
            "remote_jid": jid_prop("5538999999999@s.whatsapp.net"),
            "message_ids": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1,
                "description": "Array of message IDs to mark as read"
            }
        }),
        &["remote_jid", "message_ids"],
    )
}

fn mark_as_read(a: MarkAsRead, instance: &str) -> Endpoint {
    let read: Vec<Value> = a
        .message_ids
        .into_iter()
        .map(|id| json!({ "remoteJid": a.remote_jid, "id": id }))
        .collect();
    let body = Payload::new().field("readMessages", read);
    Endpoint::put(chat_path("markMessageAsRead", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct DeleteMessage {
    remote_jid: String,
    message_id: String,
    from_me: bool,
}

fn delete_message_schema() -> Value {
    object_schema(
        json!({
            "remote_jid": jid_prop("5538999999999@s.whatsapp.net"),
            "message_id": { "type": "string", "description": "ID of the message to delete" },
            "from_me": {
                "type": "boolean",
                "description": "Whether the message was sent by you (true) or received (false)"
            }
        }),
        &["remote_jid", "message_id", "from_me"],
    )
}

fn delete_message(a: DeleteMessage, instance: &str) -> Endpoint {
    let key = json!({
        "remoteJid": a.remote_jid,
        "fromMe": a.from_me,
        "id": a.message_id,
    });
    let body = Payload::new().field("key", key);
    Endpoint::delete(chat_path("deleteMessage", instance), body.into_map())
}
