//! Delegate core library: turns raw Slack message events into messages addressed to the bot,
//! with the channel any redirect points at. Shared by the CLI and the bot process.

pub mod config;
pub mod error;
pub mod message;
pub mod slack;

pub use error::{Error, Result};
pub use message::{Message, OriginType};
