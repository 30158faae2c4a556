//! Persistent-login cookie payload

use crate::constants::TOKEN_DELIMITER;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Cookie payload of the form `<opaque-token>:<duration>`
///
/// The duration is everything after the *last* delimiter, so tokens
/// containing colons survive a round trip.
#[derive(Clone, PartialEq, Eq)]
pub struct PersistenceToken {
    token: String,
    duration: String,
}

impl PersistenceToken {
    pub fn new<T: Into<String>, D: Into<String>>(token: T, duration: D) -> Self {
        Self {
            token: token.into(),
            duration: duration.into(),
        }
    }

    /// Parse a cookie value
    ///
    /// Values without a delimiter, with an empty token part or with a blank
    /// duration are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let (token, duration) = raw.rsplit_once(TOKEN_DELIMITER)?;
        if token.is_empty() || duration.trim().is_empty() {
            return None;
        }
        Some(Self::new(token, duration))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn into_parts(self) -> (String, String) {
        (self.token, self.duration)
    }
}

impl FromStr for PersistenceToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::invalid_argument("persistence token must look like `<token>:<duration>`")
        })
    }
}

impl fmt::Display for PersistenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.token, TOKEN_DELIMITER, self.duration)
    }
}

impl fmt::Debug for PersistenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceToken")
            .field("token", &"<redacted>")
            .field("duration", &self.duration)
            .finish()
    }
}
