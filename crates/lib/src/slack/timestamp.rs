//! Slack message timestamps (`ts`): whole seconds and microseconds joined by a period,
//! e.g. `1355517523.000005`.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};

const MAX_FRACTION_DIGITS: usize = 6;

/// Convert a Slack `ts` string to a point in time. The fractional part is optional.
pub fn parse_slack_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    let (secs, fraction) = match trimmed.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (trimmed, None),
    };

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_timestamp(raw, "seconds must be ascii digits"));
    }
    let secs: i64 = secs
        .parse()
        .map_err(|e| Error::invalid_timestamp(raw, e))?;

    let micros = match fraction {
        None => 0,
        Some(f) => {
            if f.is_empty() || f.len() > MAX_FRACTION_DIGITS || !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_timestamp(
                    raw,
                    "fraction must be 1 to 6 ascii digits",
                ));
            }
            // Right-pad so "5" reads as half a second, not five microseconds.
            let padded = format!("{:0<width$}", f, width = MAX_FRACTION_DIGITS);
            padded
                .parse::<u32>()
                .map_err(|e| Error::invalid_timestamp(raw, e))?
        }
    };

    Utc.timestamp_opt(secs, micros * 1_000)
        .single()
        .ok_or_else(|| Error::invalid_timestamp(raw, "seconds out of range"))
}

/// Inverse of [`parse_slack_timestamp`], always with six fractional digits.
pub fn format_slack_timestamp(ts: &DateTime<Utc>) -> String {
    format!("{}.{:06}", ts.timestamp(), ts.timestamp_subsec_micros())
}
