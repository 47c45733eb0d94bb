//! Decide whether a Slack message is for the bot and normalize it for the dispatcher.
//!
//! Channel messages must mention the bot (`<@SELF>`); direct messages are always addressed to it.
//! Either kind may name a redirect channel with `<#C|name> <@SELF>`.

use anyhow::Context;

use crate::config::{self, Config};
use crate::error::Result;
use crate::message::{Message, OriginType};

use super::envelope::{
    RawMessageEnvelope, GROUP_TOPIC_SUBTYPE, MESSAGE_DELETED_SUBTYPE, MESSAGE_TYPE,
    TOPIC_CHANGE_MARKER,
};
use super::reference;
use super::timestamp::parse_slack_timestamp;

/// Stateless parser bound to the bot's own user id. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct MessageParser {
    self_id: String,
}

impl MessageParser {
    pub fn new(self_id: impl Into<String>) -> Self {
        Self {
            self_id: self_id.into(),
        }
    }

    /// Build from config; the bot user id must be set (file or `DELEGATE_SELF_ID`).
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let self_id = config::resolve_self_id(config)
            .context("bot user id not configured (set slack.selfId or DELEGATE_SELF_ID)")?;
        Ok(Self::new(self_id))
    }

    pub fn self_id(&self) -> &str {
        &self.self_id
    }

    pub fn is_self(&self, user_id: &str) -> bool {
        user_id == self.self_id
    }

    /// Eligibility filter: false for non-message events, deletions, topic changes, and our own messages.
    pub fn should_process(&self, envelope: &RawMessageEnvelope) -> bool {
        if envelope.kind != MESSAGE_TYPE {
            log::debug!("slack: skipping event of type {:?}", envelope.kind);
            return false;
        }
        if envelope.subtype_is(MESSAGE_DELETED_SUBTYPE) {
            log::debug!("slack: skipping deletion notice in {}", envelope.channel);
            return false;
        }
        // Topic replies can't be threaded, and a mention inside a topic would otherwise trigger us.
        if envelope.subtype_is(GROUP_TOPIC_SUBTYPE) || envelope.text.contains(TOPIC_CHANGE_MARKER) {
            log::debug!("slack: skipping topic change in {}", envelope.channel);
            return false;
        }
        if envelope.user.as_deref().is_some_and(|u| self.is_self(u)) {
            log::debug!("slack: skipping own message in {}", envelope.channel);
            return false;
        }
        true
    }

    /// Build the normalized message for an eligible envelope.
    ///
    /// Returns `Ok(None)` for a channel message that does not mention the bot. Fails only when
    /// the timestamp cannot be converted.
    pub fn normalize(&self, envelope: &RawMessageEnvelope) -> Result<Option<Message>> {
        let timestamp = parse_slack_timestamp(&envelope.timestamp)?;
        let mut msg = Message::new(envelope.channel.clone(), timestamp, envelope.text.clone());
        for fallback in envelope.attachment_fallbacks() {
            msg.append_attachment(fallback);
        }

        if envelope.is_direct_message() {
            msg.origin_type = OriginType::DirectMessage;
        } else if !reference::addresses_user(&msg.text, &self.self_id) {
            log::debug!("slack: message in {} does not mention us", envelope.channel);
            return Ok(None);
        }

        Ok(Some(reference::parse_for_channel_reference(msg, &self.self_id)))
    }

    /// Filter then normalize. `Ok(None)` means there is nothing for the bot to do.
    pub fn parse_message(&self, envelope: &RawMessageEnvelope) -> Result<Option<Message>> {
        if !self.should_process(envelope) {
            return Ok(None);
        }
        self.normalize(envelope)
    }
}
