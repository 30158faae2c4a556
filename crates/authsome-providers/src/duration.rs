//! Human-readable durations
//!
//! Persistence durations travel inside the cookie as free text (`"2 weeks"`,
//! `"1 day"`, `"36h"`). humantime expects units glued to their numbers in
//! some spellings, so a failed parse is retried with whitespace removed.

use authsome_domain::error::{Error, Result};
use std::time::Duration;

/// Parse a relative duration such as `"2 weeks"` or `"90min"`
pub fn parse_duration(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument("duration cannot be empty"));
    }

    humantime::parse_duration(trimmed)
        .or_else(|_| {
            let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
            humantime::parse_duration(&compact)
        })
        .map_err(|e| Error::invalid_argument(format!("invalid duration '{trimmed}': {e}")))
}

/// Whether `text` parses as a duration
pub fn is_valid_duration(text: &str) -> bool {
    parse_duration(text).is_ok()
}
