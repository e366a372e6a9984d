//! Group queries (`/group/<action>/<instance>`) and the instance connection check.
//!
//! All of these are GETs whose inputs travel in the query string.

use super::{ToolSpec, object_schema, parse};
use crate::annotations::Effect;
use evolution_gateway_client::endpoint::{group_path, instance_path};
use evolution_gateway_client::{Endpoint, QueryParams};
use serde::Deserialize;
use serde_json::{Value, json};

pub(crate) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "list_groups",
            title: "List Groups",
            description: "List all WhatsApp groups the connected number participates in.",
            effect: Effect::ReadOnly,
            failure: "Failed to list groups",
            input_schema: list_groups_schema,
            build: |args, instance| Ok(list_groups(parse(args)?, instance)),
        },
        ToolSpec {
            name: "group_participants",
            title: "Group Participants",
            description: "List all members/participants of a specific WhatsApp group.",
            effect: Effect::ReadOnly,
            failure: "Failed to get group participants",
            input_schema: group_jid_schema,
            build: |args, instance| Ok(group_participants(parse(args)?, instance)),
        },
        ToolSpec {
            name: "find_group",
            title: "Find Group",
            description: "Get detailed information about a specific WhatsApp group by JID.",
            effect: Effect::ReadOnly,
            failure: "Failed to find group",
            input_schema: group_jid_schema,
            build: |args, instance| Ok(find_group(parse(args)?, instance)),
        },
        ToolSpec {
            name: "check_connection",
            title: "Check Connection",
            description: "Check the connection status of the WhatsApp instance. Returns state (open/close/connecting).",
            effect: Effect::ReadOnly,
            failure: "Failed to check connection",
            input_schema: no_input_schema,
            build: |_, instance| Ok(check_connection(instance)),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct ListGroups {
    #[serde(default)]
    get_participants: bool,
}

fn list_groups_schema() -> Value {
    object_schema(
        json!({
            "get_participants": {
                "type": "boolean",
                "description": "Include participant list for each group (default: false)"
            }
        }),
        &[],
    )
}

fn list_groups(a: ListGroups, instance: &str) -> Endpoint {
    // The gateway requires the flag, so it is always sent.
    let query = QueryParams::new().set("getParticipants", Some(a.get_participants.to_string()));
    Endpoint::get(group_path("fetchAllGroups", instance)).with_query(query)
}

#[derive(Debug, Deserialize)]
struct GroupJid {
    group_jid: String,
}

fn group_jid_schema() -> Value {
    object_schema(
        json!({
            "group_jid": {
                "type": "string",
                "description": "Group JID (e.g. 120363012345678901@g.us)"
            }
        }),
        &["group_jid"],
    )
}

fn by_group_jid(action: &str, a: GroupJid, instance: &str) -> Endpoint {
    let query = QueryParams::new().set("groupJid", Some(a.group_jid));
    Endpoint::get(group_path(action, instance)).with_query(query)
}

fn group_participants(a: GroupJid, instance: &str) -> Endpoint {
    by_group_jid("participants", a, instance)
}

fn find_group(a: GroupJid, instance: &str) -> Endpoint {
    by_group_jid("findGroupInfos", a, instance)
}

fn no_input_schema() -> Value {
    object_schema(json!({}), &[])
}

fn check_connection(instance: &str) -> Endpoint {
    Endpoint::get(instance_path("connectionState", instance))
}
