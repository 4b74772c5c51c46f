use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VoxbriefError;

/// Extension given to every scratch copy of downloaded media, whatever its kind.
pub const SCRATCH_EXTENSION: &str = "ogg";

/// What an inbound chat message carries.
///
/// `Other` keeps the transport's label for the content (e.g. `"photo"`) so the
/// generic acknowledgment can name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Voice,
    Audio,
    Video,
    VideoNote,
    Other(String),
}

impl ContentKind {
    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Voice => "voice",
            ContentKind::Audio => "audio",
            ContentKind::Video => "video",
            ContentKind::VideoNote => "video_note",
            ContentKind::Other(label) => label.as_str(),
        }
    }

    /// `true` for the four kinds the relay forwards to inference.
    pub fn is_media(&self) -> bool {
        MediaKind::try_from(self).is_ok()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content kinds eligible for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Voice,
    Audio,
    Video,
    VideoNote,
}

impl MediaKind {
    /// Wire name sent as the `media_type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Voice => "voice",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::VideoNote => "video_note",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "voice" => Some(MediaKind::Voice),
            "audio" => Some(MediaKind::Audio),
            "video" => Some(MediaKind::Video),
            "video_note" => Some(MediaKind::VideoNote),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&ContentKind> for MediaKind {
    type Error = VoxbriefError;

    fn try_from(kind: &ContentKind) -> Result<Self, Self::Error> {
        match kind {
            ContentKind::Voice => Ok(MediaKind::Voice),
            ContentKind::Audio => Ok(MediaKind::Audio),
            ContentKind::Video => Ok(MediaKind::Video),
            ContentKind::VideoNote => Ok(MediaKind::VideoNote),
            ContentKind::Text | ContentKind::Other(_) => Err(VoxbriefError::UnsupportedKind {
                kind: kind.to_string(),
            }),
        }
    }
}

impl From<MediaKind> for ContentKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Voice => ContentKind::Voice,
            MediaKind::Audio => ContentKind::Audio,
            MediaKind::Video => ContentKind::Video,
            MediaKind::VideoNote => ContentKind::VideoNote,
        }
    }
}

/// A chat message as seen by the relay, independent of the chat platform.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender_id: u64,
    pub sender_name: String,
    pub chat_id: i64,
    pub kind: ContentKind,
    /// Message text for `Text`, platform file id for media, `None` otherwise.
    pub payload_ref: Option<String>,
}

impl InboundMessage {
    pub fn text(chat_id: i64, sender_id: u64, sender_name: &str, text: &str) -> Self {
        Self {
            sender_id,
            sender_name: sender_name.to_string(),
            chat_id,
            kind: ContentKind::Text,
            payload_ref: Some(text.to_string()),
        }
    }

    pub fn media(
        chat_id: i64,
        sender_id: u64,
        sender_name: &str,
        kind: MediaKind,
        file_id: &str,
    ) -> Self {
        Self {
            sender_id,
            sender_name: sender_name.to_string(),
            chat_id,
            kind: kind.into(),
            payload_ref: Some(file_id.to_string()),
        }
    }
}

/// Successful inference reply, as returned by `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySummary {
    #[serde(rename = "summary")]
    pub summary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_short: Option<String>,
}
