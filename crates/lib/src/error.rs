//! Library error type.
//!
//! Only conversion of platform data can fail. A message that is not addressed to the bot
//! is not an error; the parser reports it as `Ok(None)`.

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform timestamp (`<seconds>.<micros>`) could not be converted.
    #[error("invalid slack timestamp {raw:?}: {reason}")]
    InvalidTimestamp { raw: String, reason: String },

    /// The raw event payload is not a message envelope.
    #[error("invalid message envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_timestamp(raw: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidTimestamp {
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}
