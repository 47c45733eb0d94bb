//! Normalized inbound message handed to the dispatcher.
//!
//! Built fresh for every parsed event and owned by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator placed between the message text and each attachment fallback.
pub const ATTACHMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Where the message was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginType {
    /// A public or private channel; the bot must be mentioned explicitly.
    Channel,
    /// A direct-message conversation with the bot.
    DirectMessage,
}

/// A message that is addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Conversation id the message arrived on.
    pub origin: String,
    pub origin_type: OriginType,
    /// Channel the dispatcher should treat as the active context. Defaults to `origin`.
    pub interrupt_target: String,
    pub timestamp: DateTime<Utc>,
    /// Message body with attachment fallbacks appended.
    pub text: String,
}

impl Message {
    /// Channel-origin message whose interrupt target is its own origin.
    pub fn new(origin: impl Into<String>, timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            interrupt_target: origin.clone(),
            origin,
            origin_type: OriginType::Channel,
            timestamp,
            text: text.into(),
        }
    }

    /// Append an attachment's fallback text after a `---` divider. Empty fallbacks are skipped.
    pub fn append_attachment(&mut self, fallback: &str) {
        if fallback.is_empty() {
            return;
        }
        self.text.push_str(ATTACHMENT_SEPARATOR);
        self.text.push_str(fallback);
    }

    pub fn is_direct(&self) -> bool {
        self.origin_type == OriginType::DirectMessage
    }
}
