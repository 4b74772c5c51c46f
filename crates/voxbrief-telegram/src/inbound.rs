//! Telegram `Message` → platform-neutral `InboundMessage`.

use teloxide::types::Message;
use voxbrief_core::{ContentKind, InboundMessage};

/// Classify a Telegram message by content kind.
///
/// Text wins over everything; the four media kinds carry their file id;
/// anything else becomes `Other` with a label naming the content.
pub fn classify(msg: &Message) -> InboundMessage {
    let (sender_id, sender_name) = msg
        .from
        .as_ref()
        .map(|u| (u.id.0, u.first_name.clone()))
        .unwrap_or((0, String::new()));

    let (kind, payload_ref) = if let Some(text) = msg.text() {
        (ContentKind::Text, Some(text.to_string()))
    } else if let Some(voice) = msg.voice() {
        (ContentKind::Voice, Some(voice.file.id.to_string()))
    } else if let Some(audio) = msg.audio() {
        (ContentKind::Audio, Some(audio.file.id.to_string()))
    } else if let Some(video) = msg.video() {
        (ContentKind::Video, Some(video.file.id.to_string()))
    } else if let Some(note) = msg.video_note() {
        (ContentKind::VideoNote, Some(note.file.id.to_string()))
    } else {
        (ContentKind::Other(other_label(msg).to_string()), None)
    };

    InboundMessage {
        sender_id,
        sender_name,
        chat_id: msg.chat.id.0,
        kind,
        payload_ref,
    }
}

fn other_label(msg: &Message) -> &'static str {
    // Animations also carry a `document`; check them first.
    if msg.animation().is_some() {
        "animation"
    } else if msg.photo().is_some() {
        "photo"
    } else if msg.sticker().is_some() {
        "sticker"
    } else if msg.document().is_some() {
        "document"
    } else if msg.location().is_some() {
        "location"
    } else if msg.contact().is_some() {
        "contact"
    } else if msg.poll().is_some() {
        "poll"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn message(extra: Value) -> Message {
        let mut base = json!({
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": 555, "type": "private", "first_name": "Ann" },
            "from": { "id": 42, "is_bot": false, "first_name": "Ann" },
        });
        if let (Some(obj), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn text_message() {
        let inbound = classify(&message(json!({ "text": "hello" })));
        assert_eq!(inbound.kind, ContentKind::Text);
        assert_eq!(inbound.payload_ref.as_deref(), Some("hello"));
        assert_eq!(inbound.sender_id, 42);
        assert_eq!(inbound.sender_name, "Ann");
        assert_eq!(inbound.chat_id, 555);
    }

    #[test]
    fn voice_message_carries_file_id() {
        let inbound = classify(&message(json!({
            "voice": {
                "file_id": "abc123", "file_unique_id": "u1",
                "duration": 3, "mime_type": "audio/ogg", "file_size": 10
            }
        })));
        assert_eq!(inbound.kind, ContentKind::Voice);
        assert_eq!(inbound.payload_ref.as_deref(), Some("abc123"));
    }

    #[test]
    fn audio_message_carries_file_id() {
        let inbound = classify(&message(json!({
            "audio": {
                "file_id": "au1", "file_unique_id": "u3", "duration": 120,
                "title": "Interview", "mime_type": "audio/mpeg", "file_size": 2048
            }
        })));
        assert_eq!(inbound.kind, ContentKind::Audio);
        assert_eq!(inbound.payload_ref.as_deref(), Some("au1"));
    }

    #[test]
    fn video_message_carries_file_id() {
        let inbound = classify(&message(json!({
            "video": {
                "file_id": "vid1", "file_unique_id": "u4",
                "width": 640, "height": 360, "duration": 12,
                "mime_type": "video/mp4", "file_size": 4096
            }
        })));
        assert_eq!(inbound.kind, ContentKind::Video);
        assert_eq!(inbound.payload_ref.as_deref(), Some("vid1"));
    }

    #[test]
    fn video_note_message() {
        let inbound = classify(&message(json!({
            "video_note": {
                "file_id": "vn1", "file_unique_id": "u2",
                "length": 240, "duration": 5, "file_size": 10
            }
        })));
        assert_eq!(inbound.kind, ContentKind::VideoNote);
        assert_eq!(inbound.payload_ref.as_deref(), Some("vn1"));
    }

    #[test]
    fn location_is_other() {
        let inbound = classify(&message(json!({
            "location": { "latitude": 52.5, "longitude": 13.4 }
        })));
        assert_eq!(inbound.kind, ContentKind::Other("location".into()));
        assert!(inbound.payload_ref.is_none());
    }
}
