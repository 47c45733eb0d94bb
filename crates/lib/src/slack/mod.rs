//! Slack message intake.
//!
//! Raw `message` events are filtered and normalized into [`crate::message::Message`] values
//! by [`MessageParser`]. Reference matching and timestamp conversion are usable on their own.

mod envelope;
mod parser;
pub mod reference;
mod timestamp;

pub use envelope::{
    Attachment, RawMessageEnvelope, DIRECT_MESSAGE_PREFIX, GROUP_TOPIC_SUBTYPE,
    MESSAGE_DELETED_SUBTYPE, MESSAGE_TYPE, TOPIC_CHANGE_MARKER,
};
pub use parser::MessageParser;
pub use reference::{find_all, find_first, PatternKind, Reference, MAX_REFERENCE_SCAN};
pub use timestamp::{format_slack_timestamp, parse_slack_timestamp};
