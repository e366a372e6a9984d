//! Message senders (`/message/<action>/<instance>`, all POST).

use super::{Payload, ToolSpec, delay_prop, jid_prop, object_schema, parse, phone_number_prop};
use crate::annotations::Effect;
use evolution_gateway_client::Endpoint;
use evolution_gateway_client::endpoint::message_path;
use serde::Deserialize;
use serde_json::{Number, Value, json};

pub(crate) fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "send_text",
            title: "Send Text Message",
            description: "Send a WhatsApp text message to a phone number via Evolution API.",
            effect: Effect::Mutating,
            failure: "Failed to send text message",
            input_schema: send_text_schema,
            build: |args, instance| Ok(send_text(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_media",
            title: "Send Media Message",
            description: "Send a WhatsApp media message (image, video, or document). Media URL must be publicly accessible.",
            effect: Effect::Mutating,
            failure: "Failed to send media message",
            input_schema: send_media_schema,
            build: |args, instance| Ok(send_media(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_audio",
            title: "Send Audio Message",
            description: "Send a WhatsApp audio message (voice note). Audio URL must be publicly accessible.",
            effect: Effect::Mutating,
            failure: "Failed to send audio message",
            input_schema: send_audio_schema,
            build: |args, instance| Ok(send_audio(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_location",
            title: "Send Location",
            description: "Send a WhatsApp location pin to a phone number.",
            effect: Effect::Mutating,
            failure: "Failed to send location",
            input_schema: send_location_schema,
            build: |args, instance| Ok(send_location(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_contact",
            title: "Send Contact Card",
            description: "Send a WhatsApp contact card (vCard) to a phone number.",
            effect: Effect::Mutating,
            failure: "Failed to send contact card",
            input_schema: send_contact_schema,
            build: |args, instance| Ok(send_contact(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_reaction",
            title: "Send Reaction",
            description: "React to a specific WhatsApp message with an emoji.",
            effect: Effect::Mutating,
            failure: "Failed to send reaction",
            input_schema: send_reaction_schema,
            build: |args, instance| Ok(send_reaction(parse(args)?, instance)),
        },
        ToolSpec {
            name: "send_poll",
            title: "Send Poll",
            description: "Send a WhatsApp poll to a phone number.",
            effect: Effect::Mutating,
            failure: "Failed to send poll",
            input_schema: send_poll_schema,
            build: |args, instance| Ok(send_poll(parse(args)?, instance)),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct SendText {
    number: String,
    text: String,
    delay: Option<Number>,
    link_preview: Option<bool>,
}

fn send_text_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "text": { "type": "string", "minLength": 1, "description": "Message text content" },
            "delay": delay_prop("Typing"),
            "link_preview": {
                "type": "boolean",
                "description": "Enable link preview in message (default: true)"
            }
        }),
        &["number", "text"],
    )
}

fn send_text(a: SendText, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("number", a.number)
        .field("text", a.text)
        .optional("delay", a.delay)
        .optional("linkPreview", a.link_preview);
    Endpoint::post(message_path("sendText", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MediaType {
    Image,
    Video,
    Document,
}

impl MediaType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendMedia {
    number: String,
    media_type: MediaType,
    media_url: String,
    caption: Option<String>,
    file_name: Option<String>,
    delay: Option<Number>,
}

fn send_media_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "media_type": {
                "type": "string",
                "enum": ["image", "video", "document"],
                "description": "Type of media to send"
            },
            "media_url": {
                "type": "string",
                "format": "uri",
                "description": "Publicly accessible URL of the media file"
            },
            "caption": { "type": "string", "description": "Optional caption for the media" },
            "file_name": {
                "type": "string",
                "description": "File name for documents (e.g. report.pdf)"
            },
            "delay": delay_prop("Typing")
        }),
        &["number", "media_type", "media_url"],
    )
}

fn send_media(a: SendMedia, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("number", a.number)
        .field("mediatype", a.media_type.as_str())
        .field("media", a.media_url)
        .non_empty("caption", a.caption)
        .non_empty("fileName", a.file_name)
        .optional("delay", a.delay);
    Endpoint::post(message_path("sendMedia", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct SendAudio {
    number: String,
    audio_url: String,
    delay: Option<Number>,
}

fn send_audio_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "audio_url": {
                "type": "string",
                "format": "uri",
                "description": "Publicly accessible URL of the audio file"
            },
            "delay": delay_prop("Recording")
        }),
        &["number", "audio_url"],
    )
}

fn send_audio(a: SendAudio, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("number", a.number)
        .field("audio", a.audio_url)
        .optional("delay", a.delay);
    Endpoint::post(message_path("sendWhatsAppAudio", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct SendLocation {
    number: String,
    latitude: Number,
    longitude: Number,
    name: Option<String>,
    address: Option<String>,
    delay: Option<Number>,
}

fn send_location_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "latitude": { "type": "number", "description": "Latitude coordinate" },
            "longitude": { "type": "number", "description": "Longitude coordinate" },
            "name": { "type": "string", "description": "Location name (e.g. restaurant name)" },
            "address": { "type": "string", "description": "Full address text" },
            "delay": delay_prop("Typing")
        }),
        &["number", "latitude", "longitude"],
    )
}

fn send_location(a: SendLocation, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("number", a.number)
        .field("latitude", a.latitude)
        .field("longitude", a.longitude)
        .non_empty("name", a.name)
        .non_empty("address", a.address)
        .optional("delay", a.delay);
    Endpoint::post(message_path("sendLocation", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct SendContact {
    number: String,
    contact_name: String,
    contact_phone: String,
    delay: Option<Number>,
}

fn send_contact_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "contact_name": {
                "type": "string",
                "description": "Full name of the contact to share"
            },
            "contact_phone": {
                "type": "string",
                "description": "Phone number of the contact to share (with country code, no +)"
            },
            "delay": delay_prop("Typing")
        }),
        &["number", "contact_name", "contact_phone"],
    )
}

fn send_contact(a: SendContact, instance: &str) -> Endpoint {
    let card = json!({
        "fullName": a.contact_name,
        "wuid": a.contact_phone,
        "phoneNumber": a.contact_phone,
    });
    let body = Payload::new()
        .field("number", a.number)
        .field("contact", vec![card])
        .optional("delay", a.delay);
    Endpoint::post(message_path("sendContact", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct SendReaction {
    remote_jid: String,
    message_id: String,
    emoji: String,
}

fn send_reaction_schema() -> Value {
    object_schema(
        json!({
            "remote_jid": jid_prop("5538999999999@s.whatsapp.net or group JID"),
            "message_id": { "type": "string", "description": "ID of the message to react to" },
            "emoji": {
                "type": "string",
                "description": "Reaction emoji (e.g. 👍, ❤️, 😂). Send empty string to remove reaction."
            }
        }),
        &["remote_jid", "message_id", "emoji"],
    )
}

fn send_reaction(a: SendReaction, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("key", json!({ "remoteJid": a.remote_jid, "id": a.message_id }))
        .field("reaction", a.emoji);
    Endpoint::post(message_path("sendReaction", instance), body.into_map())
}

#[derive(Debug, Deserialize)]
struct SendPoll {
    number: String,
    question: String,
    options: Vec<String>,
    max_selections: Option<Number>,
    delay: Option<Number>,
}

fn send_poll_schema() -> Value {
    object_schema(
        json!({
            "number": phone_number_prop(),
            "question": { "type": "string", "description": "Poll question text" },
            "options": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 2,
                "maxItems": 12,
                "description": "Poll answer options (2-12 choices)"
            },
            "max_selections": {
                "type": "number",
                "description": "Maximum number of selections allowed (default: 1 for single choice)"
            },
            "delay": delay_prop("Typing")
        }),
        &["number", "question", "options"],
    )
}

fn send_poll(a: SendPoll, instance: &str) -> Endpoint {
    let body = Payload::new()
        .field("number", a.number)
        .field("name", a.question)
        .field("values", a.options)
        .field("selectableCount", a.max_selections.unwrap_or_else(|| Number::from(1)))
        .optional("delay", a.delay);
    Endpoint::post(message_path("sendPoll", instance), body.into_map())
}

#[cfg(test)]
mod tests {
    use super::tools;
    use evolution_gateway_client::{Endpoint, Method};
    use serde_json::{Value, json};

    fn build(name: &str, args: Value) -> Endpoint {
        let spec = tools()
            .into_iter()
            .find(|t| t.name == name)
            .expect("tool exists");
        let args = args.as_object().cloned().expect("object args");
        (spec.build)(&args, "main").expect("build endpoint")
    }

    fn body(e: &Endpoint) -> Value {
        Value::Object(e.body.clone().expect("body present"))
    }

    #[test]
    fn send_text_minimal_omits_optional_keys() {
        let e = build("send_text", json!({"number": "551", "text": "hi"}));
        assert_eq!(e.method, Method::POST);
        assert_eq!(e.path, "/message/sendText/main");
        assert_eq!(body(&e), json!({"number": "551", "text": "hi"}));
    }

    #[test]
    fn send_text_renames_link_preview_and_keeps_integer_delay() {
        let e = build(
            "send_text",
            json!({"number": "551", "text": "hi", "delay": 1200, "link_preview": false}),
        );
        assert_eq!(
            body(&e),
            json!({"number": "551", "text": "hi", "delay": 1200, "linkPreview": false})
        );
        assert_eq!(
            serde_json::to_string(&body(&e)["delay"]).expect("serialize"),
            "1200"
        );
    }

    #[test]
    fn send_media_maps_field_names_and_skips_empty_caption() {
        let e = build(
            "send_media",
            json!({
                "number": "551",
                "media_type": "document",
                "media_url": "https://cdn.example.com/r.pdf",
                "caption": "",
                "file_name": "r.pdf"
            }),
        );
        assert_eq!(e.path, "/message/sendMedia/main");
        assert_eq!(
            body(&e),
            json!({
                "number": "551",
                "mediatype": "document",
                "media": "https://cdn.example.com/r.pdf",
                "fileName": "r.pdf"
            })
        );
    }

    #[test]
    fn send_audio_uses_whatsapp_audio_action() {
        let e = build(
            "send_audio",
            json!({"number": "551", "audio_url": "https://cdn.example.com/a.ogg", "delay": 500}),
        );
        assert_eq!(e.path, "/message/sendWhatsAppAudio/main");
        assert_eq!(
            body(&e),
            json!({"number": "551", "audio": "https://cdn.example.com/a.ogg", "delay": 500})
        );
    }

    #[test]
    fn send_location_includes_only_given_labels() {
        let e = build(
            "send_location",
            json!({"number": "551", "latitude": -19.92, "longitude": -43.94, "name": "Praça"}),
        );
        assert_eq!(e.path, "/message/sendLocation/main");
        assert_eq!(
            body(&e),
            json!({"number": "551", "latitude": -19.92, "longitude": -43.94, "name": "Praça"})
        );
    }

    #[test]
    fn send_contact_builds_single_card() {
        let e = build(
            "send_contact",
            json!({"number": "551", "contact_name": "Ana", "contact_phone": "5531999"}),
        );
        assert_eq!(e.path, "/message/sendContact/main");
        assert_eq!(
            body(&e),
            json!({
                "number": "551",
                "contact": [{"fullName": "Ana", "wuid": "5531999", "phoneNumber": "5531999"}]
            })
        );
    }

    #[test]
    fn send_reaction_nests_key() {
        let e = build(
            "send_reaction",
            json!({"remote_jid": "551@s.whatsapp.net", "message_id": "M1", "emoji": "👍"}),
        );
        assert_eq!(e.path, "/message/sendReaction/main");
        assert_eq!(
            body(&e),
            json!({"key": {"remoteJid": "551@s.whatsapp.net", "id": "M1"}, "reaction": "👍"})
        );
    }

    #[test]
    fn send_poll_defaults_to_single_choice() {
        let e = build(
            "send_poll",
            json!({"number": "551", "question": "Q", "options": ["A", "B"]}),
        );
        assert_eq!(e.path, "/message/sendPoll/main");
        assert_eq!(
            body(&e),
            json!({"number": "551", "name": "Q", "values": ["A", "B"], "selectableCount": 1})
        );
    }

    #[test]
    fn send_poll_passes_max_selections_through() {
        let e = build(
            "send_poll",
            json!({
                "number": "551",
                "question": "Q",
                "options": ["A", "B", "C"],
                "max_selections": 2
            }),
        );
        assert_eq!(body(&e)["selectableCount"], json!(2));
    }
}
