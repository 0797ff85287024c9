//! Token forms for dates and durations.
//!
//! Dates travel as RFC 3339 with nanosecond precision in UTC; durations as
//! `secs.nanos` with a fixed nine-digit fraction. Both decoders accept
//! surrounding whitespace.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Error;

pub fn encode_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_date(text: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|fixed| fixed.with_timezone(&Utc))
        .map_err(|_| Error::BadDate(text.to_owned()))
}

pub fn encode_duration(duration: &Duration) -> String {
    format!("{}.{:09}", duration.as_secs(), duration.subsec_nanos())
}

pub fn decode_duration(text: &str) -> Result<Duration, Error> {
    let bad = || Error::BadDuration(text.to_owned());
    let trimmed = text.trim();

    let (secs_part, frac_part) = match trimmed.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (trimmed, None),
    };
    let secs: u64 = secs_part.parse().map_err(|_| bad())?;

    let nanos = match frac_part {
        None | Some("") => 0,
        Some(frac) => {
            if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            // Fraction digits scale by position: "5" means half a second.
            let parsed: u32 = frac.parse().map_err(|_| bad())?;
            parsed * 10_u32.pow(9 - frac.len() as u32)
        }
    };

    Ok(Duration::new(secs, nanos))
}
