//! Per-deployment settings

use crate::constants::{DEFAULT_MODEL, DEFAULT_PERSIST_DURATION};
use serde::{Deserialize, Serialize};

/// Per-deployment authentication settings
///
/// The three storage keys fall back to `model` when unset or empty, so a
/// deployment never reads another model's cache, session or cookie entry
/// unless it is configured to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Identity model name, also used to qualify bare field lookups
    pub model: String,

    /// Key of the identity in the request cache
    pub configure_key: Option<String>,

    /// Key of the identity in the session store
    pub session_key: Option<String>,

    /// Key of the persistence token in the cookie store
    pub cookie_key: Option<String>,

    /// Duration used by `persist` when the caller gives none
    pub default_persist_duration: String,

    /// Whether logout also deletes the persistence cookie
    pub clear_cookie_on_logout: bool,
}

/// Returns default settings with:
/// - Model `"User"` and every storage key derived from it
/// - Persistent logins lasting two weeks
/// - Logout clearing the persistence cookie
impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            configure_key: None,
            session_key: None,
            cookie_key: None,
            default_persist_duration: DEFAULT_PERSIST_DURATION.to_string(),
            clear_cookie_on_logout: true,
        }
    }
}

impl Settings {
    /// Default settings for another model name
    pub fn for_model<S: Into<String>>(model: S) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_configure_key<S: Into<String>>(mut self, key: S) -> Self {
        self.configure_key = Some(key.into());
        self
    }

    pub fn with_session_key<S: Into<String>>(mut self, key: S) -> Self {
        self.session_key = Some(key.into());
        self
    }

    pub fn with_cookie_key<S: Into<String>>(mut self, key: S) -> Self {
        self.cookie_key = Some(key.into());
        self
    }

    pub fn with_clear_cookie_on_logout(mut self, clear: bool) -> Self {
        self.clear_cookie_on_logout = clear;
        self
    }

    pub fn configure_key(&self) -> &str {
        self.key_or_model(self.configure_key.as_deref())
    }

    pub fn session_key(&self) -> &str {
        self.key_or_model(self.session_key.as_deref())
    }

    pub fn cookie_key(&self) -> &str {
        self.key_or_model(self.cookie_key.as_deref())
    }

    /// A copy with every storage key spelled out
    pub fn resolved(&self) -> Self {
        Self {
            configure_key: Some(self.configure_key().to_string()),
            session_key: Some(self.session_key().to_string()),
            cookie_key: Some(self.cookie_key().to_string()),
            ..self.clone()
        }
    }

    fn key_or_model<'a>(&'a self, key: Option<&'a str>) -> &'a str {
        match key {
            Some(key) if !key.is_empty() => key,
            _ => &self.model,
        }
    }
}
