//! Raw Slack `message` event as delivered by the RTM / Events API.
//!
//! Only the fields the parser reads are declared; everything else in the event is ignored.

use serde::Deserialize;

use crate::error::Result;

/// Event `type` of a chat message.
pub const MESSAGE_TYPE: &str = "message";
/// Subtype Slack sends when a message is deleted.
pub const MESSAGE_DELETED_SUBTYPE: &str = "message_deleted";
/// Subtype Slack sends when a private channel topic changes.
pub const GROUP_TOPIC_SUBTYPE: &str = "group_topic";
/// Text Slack writes into topic-change notices.
pub const TOPIC_CHANGE_MARKER: &str = "set the channel topic: ";
/// Direct-message conversation ids start with this character.
pub const DIRECT_MESSAGE_PREFIX: char = 'D';

/// Slack message event payload (read-only input to the parser).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessageEnvelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub channel: String,
    /// Sender user id. Absent for some bot and system messages.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Raw `ts` (`<seconds>.<micros>`).
    #[serde(rename = "ts", default)]
    pub timestamp: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Message attachment; only the plain-text fallback is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub fallback: Option<String>,
}

impl RawMessageEnvelope {
    /// Parse an event payload from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn subtype_is(&self, subtype: &str) -> bool {
        self.subtype.as_deref() == Some(subtype)
    }

    /// True if the conversation is a direct message with the bot.
    pub fn is_direct_message(&self) -> bool {
        self.channel.starts_with(DIRECT_MESSAGE_PREFIX)
    }

    /// Non-empty attachment fallbacks in order.
    pub fn attachment_fallbacks(&self) -> impl Iterator<Item = &str> {
        self.attachments
            .iter()
            .filter_map(|a| a.fallback.as_deref())
            .filter(|f| !f.is_empty())
    }
}
