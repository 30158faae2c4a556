//! Login credentials, tagged by credential type

use crate::constants::{COOKIE_TYPE, CREDENTIALS_TYPE, GUEST_TYPE};
use crate::error::{Error, Result};
use crate::value_objects::PersistenceToken;
use serde_json::{Value, json};
use std::fmt;

/// What a caller presents to a credential backend
///
/// Each variant maps to one credential type string; [`Credentials::kind`]
/// returns it. `Debug` never prints payloads, which usually hold secrets.
#[derive(Clone, PartialEq)]
pub enum Credentials {
    /// Interactive login (`"credentials"`), typically username and password
    Payload(Value),

    /// Persistent-login cookie token (`"cookie"`)
    Cookie {
        /// The opaque single-use token
        token: String,
        /// Remaining lifetime expression, e.g. `"2 weeks"`
        duration: String,
    },

    /// Anonymous fallback account (`"guest"`)
    Guest,

    /// Any deployment-specific credential type
    Custom {
        /// The credential type string
        kind: String,
        /// Type-specific payload
        payload: Value,
    },
}

impl Credentials {
    /// Username/password credentials of type `"credentials"`
    pub fn password<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self::Payload(json!({
            "username": username.into(),
            "password": password.into(),
        }))
    }

    /// Build credentials from a loosely typed call
    ///
    /// A missing type means `"credentials"`. Cookie credentials need an
    /// object payload with string `token` and `duration` fields.
    pub fn from_parts(kind: Option<&str>, payload: Option<Value>) -> Result<Self> {
        let payload = payload.unwrap_or(Value::Null);
        match kind.unwrap_or(CREDENTIALS_TYPE) {
            CREDENTIALS_TYPE => Ok(Self::Payload(payload)),
            GUEST_TYPE => Ok(Self::Guest),
            COOKIE_TYPE => {
                let field = |name: &str| {
                    payload
                        .get(name)
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                        .ok_or_else(|| {
                            Error::invalid_argument(format!(
                                "cookie credentials require a string `{name}` field"
                            ))
                        })
                };
                Ok(Self::Cookie {
                    token: field("token")?,
                    duration: field("duration")?,
                })
            }
            other => Ok(Self::Custom {
                kind: other.to_string(),
                payload,
            }),
        }
    }

    /// The credential type string
    pub fn kind(&self) -> &str {
        match self {
            Self::Payload(_) => CREDENTIALS_TYPE,
            Self::Cookie { .. } => COOKIE_TYPE,
            Self::Guest => GUEST_TYPE,
            Self::Custom { kind, .. } => kind.as_str(),
        }
    }

    /// The raw payload for payload-carrying variants
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Payload(payload) | Self::Custom { payload, .. } => Some(payload),
            Self::Cookie { .. } | Self::Guest => None,
        }
    }
}

impl From<Value> for Credentials {
    fn from(payload: Value) -> Self {
        Self::Payload(payload)
    }
}

impl From<PersistenceToken> for Credentials {
    fn from(token: PersistenceToken) -> Self {
        let (token, duration) = token.into_parts();
        Self::Cookie { token, duration }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cookie { duration, .. } => f
                .debug_struct("Cookie")
                .field("token", &"<redacted>")
                .field("duration", duration)
                .finish(),
            other => f
                .debug_struct("Credentials")
                .field("kind", &other.kind())
                .finish_non_exhaustive(),
        }
    }
}
