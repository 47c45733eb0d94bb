//! Inline reference tokens in Slack message text.
//!
//! Slack encodes references with a bracket/pipe syntax:
//! - user mention: `<@U024BE7LH>`
//! - channel reference: `<#C024BE7LR|general>`
//! - channel-mention pair: a channel reference, whitespace, then a user mention
//!   (`<#C1|general> <@UBOT>`), read as "take this conversation to that channel".
//!
//! Matching is exact and case-sensitive. Scans stop after [`MAX_REFERENCE_SCAN`] matches.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::message::Message;

/// Upper bound on matches considered per scan.
pub const MAX_REFERENCE_SCAN: usize = 32;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@([^>]+)>").expect("mention regex must compile"));

static CHANNEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<#([^|]+)\|([^>]+)>").expect("channel reference regex must compile")
});

static CHANNEL_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<#([^|]+)\|([^>]+)>\s+<@([^>]+)>")
        .expect("channel mention regex must compile")
});

/// Which reference syntax to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `<@USER>`
    Mention,
    /// `<#CHANNEL|name>`
    Channel,
    /// `<#CHANNEL|name> <@USER>`
    ChannelMention,
}

impl PatternKind {
    fn regex(self) -> &'static Regex {
        match self {
            PatternKind::Mention => &*MENTION_RE,
            PatternKind::Channel => &*CHANNEL_RE,
            PatternKind::ChannelMention => &*CHANNEL_MENTION_RE,
        }
    }
}

/// Captured parts of one reference token. Fields not carried by the pattern kind are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub user_id: Option<String>,
}

impl Reference {
    fn from_captures(kind: PatternKind, caps: &Captures<'_>) -> Self {
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
        match kind {
            PatternKind::Mention => Self {
                channel_id: None,
                channel_name: None,
                user_id: group(1),
            },
            PatternKind::Channel => Self {
                channel_id: group(1),
                channel_name: group(2),
                user_id: None,
            },
            PatternKind::ChannelMention => Self {
                channel_id: group(1),
                channel_name: group(2),
                user_id: group(3),
            },
        }
    }
}

/// Leftmost non-overlapping references of `kind`, at most [`MAX_REFERENCE_SCAN`].
pub fn find_all(text: &str, kind: PatternKind) -> impl Iterator<Item = Reference> + '_ {
    kind.regex()
        .captures_iter(text)
        .take(MAX_REFERENCE_SCAN)
        .map(move |caps| Reference::from_captures(kind, &caps))
}

pub fn find_first(text: &str, kind: PatternKind) -> Option<Reference> {
    find_all(text, kind).next()
}

/// True if the text mentions `self_id` (`<@self_id>`).
pub fn mentions_user(text: &str, self_id: &str) -> bool {
    find_all(text, PatternKind::Mention).any(|r| r.user_id.as_deref() == Some(self_id))
}

/// True if `<@self_id>` appears anywhere in the text, however many other mentions precede it.
pub fn addresses_user(text: &str, self_id: &str) -> bool {
    MENTION_RE
        .captures_iter(text)
        .any(|caps| caps.get(1).is_some_and(|m| m.as_str() == self_id))
}

/// Channel id from the first `<#C|name> <@self_id>` pair in the text.
pub fn redirect_channel(text: &str, self_id: &str) -> Option<String> {
    find_all(text, PatternKind::ChannelMention)
        .find(|r| r.user_id.as_deref() == Some(self_id))
        .and_then(|r| r.channel_id)
}

/// Whether the message text mentions the bot.
pub fn check_for_mention(msg: &Message, self_id: &str) -> bool {
    mentions_user(&msg.text, self_id)
}

/// Redirect the message to the channel named next to a mention of the bot, if any.
pub fn parse_for_channel_reference(mut msg: Message, self_id: &str) -> Message {
    if let Some(channel) = redirect_channel(&msg.text, self_id) {
        msg.interrupt_target = channel;
    }
    msg
}

/// Redirect the message to the first channel it references, mention or not.
pub fn parse_for_any_channel_reference(mut msg: Message) -> Message {
    if let Some(channel) = find_first(&msg.text, PatternKind::Channel).and_then(|r| r.channel_id) {
        msg.interrupt_target = channel;
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const BOT: &str = "UBOT";

    fn msg(text: &str) -> Message {
        Message::new("C0", Utc.timestamp_opt(1_355_517_523, 0).unwrap(), text)
    }

    #[test]
    fn find_first_channel_mention_captures_all_parts() {
        let r = find_first("hey <#C1|general> <@UBOT> help", PatternKind::ChannelMention).unwrap();
        assert_eq!(r.channel_id.as_deref(), Some("C1"));
        assert_eq!(r.channel_name.as_deref(), Some("general"));
        assert_eq!(r.user_id.as_deref(), Some("UBOT"));
    }

    #[test]
    fn find_first_returns_none_without_match() {
        assert_eq!(find_first("no refs here, @UBOT #general", PatternKind::Mention), None);
        assert_eq!(find_first("<#C1> <@UBOT>", PatternKind::ChannelMention), None);
    }

    #[test]
    fn mention_is_exact_and_case_sensitive() {
        assert!(mentions_user("ping <@UBOT>", BOT));
        assert!(!mentions_user("ping <@ubot>", BOT));
        assert!(!mentions_user("ping <@UBOT2>", BOT));
        assert!(!mentions_user("ping @UBOT", BOT));
    }

    #[test]
    fn redirect_requires_pair_with_self() {
        assert_eq!(redirect_channel("<#C1|general> <@UBOT>", BOT), Some("C1".into()));
        assert_eq!(redirect_channel("<#C1|general>\n\t<@UBOT>", BOT), Some("C1".into()));
        assert_eq!(redirect_channel("<#C1|general> <@UOTHER>", BOT), None);
        assert_eq!(redirect_channel("<#C1|general>, <@UBOT>", BOT), None);
        assert_eq!(redirect_channel("<#C1|general><@UBOT>", BOT), None);
    }

    #[test]
    fn redirect_skips_pairs_for_other_users() {
        let text = "<#C1|one> <@UOTHER> and <#C2|two> <@UBOT> and <#C3|three> <@UBOT>";
        assert_eq!(redirect_channel(text, BOT), Some("C2".into()));
    }

    #[test]
    fn parse_for_channel_reference_overrides_target() {
        let out = parse_for_channel_reference(msg("<#C9|ops> <@UBOT> deploy?"), BOT);
        assert_eq!(out.interrupt_target, "C9");
        assert_eq!(out.origin, "C0");
    }

    #[test]
    fn parse_for_any_channel_reference_takes_first() {
        let out = parse_for_any_channel_reference(msg("see <#C5|five> then <#C6|six>"));
        assert_eq!(out.interrupt_target, "C5");
    }

    #[test]
    fn helpers_are_idempotent_without_references() {
        let original = msg("plain text, nothing to see");
        let once = parse_for_any_channel_reference(parse_for_channel_reference(original.clone(), BOT));
        let twice = parse_for_any_channel_reference(parse_for_channel_reference(once.clone(), BOT));
        assert_eq!(once, original);
        assert_eq!(twice, once);
        assert!(!check_for_mention(&once, BOT));
    }

    #[test]
    fn scan_is_capped() {
        let mut text: String = (0..40).map(|i| format!("<#C{}|c{}> ", i, i)).collect();
        text.push_str("<@UBOT>");
        assert_eq!(find_all(&text, PatternKind::Channel).count(), MAX_REFERENCE_SCAN);
        assert_eq!(
            find_first(&text, PatternKind::Channel).and_then(|r| r.channel_id).as_deref(),
            Some("C0")
        );

        // Only the 40th channel is paired with the mention; it is past the cap for plain
        // channel scans but the pair scan sees exactly one match.
        assert_eq!(redirect_channel(&text, BOT), Some("C39".into()));

    }

    #[test]
    fn mention_helper_is_capped_but_addressing_is_not() {
        let mentions: String = (0..40).map(|i| format!("<@U{}> ", i)).collect::<String>() + "<@UBOT>";
        assert!(!mentions_user(&mentions, BOT));
        assert!(addresses_user(&mentions, BOT));
        assert!(!addresses_user("<@UBOT2> <@ubot>", BOT));
    }
}
