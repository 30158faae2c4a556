//! Security configuration types

use authsome_domain::constants::DEFAULT_HASH_METHOD;
use serde::{Deserialize, Serialize};

/// Password hashing and cookie encryption settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Deployment-wide salt prepended to passwords when salting
    pub salt: String,

    /// Method used by `hash_default` callers and the bundled backend
    pub default_hash_method: String,

    /// Whether stored passwords are salted with `salt`
    pub salt_passwords: bool,

    /// Hex-encoded 32-byte key for cookie encryption
    ///
    /// When unset a random key is generated at startup, so persistent
    /// logins do not survive a restart.
    pub cookie_secret: Option<String>,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            salt: String::new(),
            default_hash_method: DEFAULT_HASH_METHOD.to_string(),
            salt_passwords: false,
            cookie_secret: None,
            bcrypt_cost: authsome_providers::constants::BCRYPT_DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("salt", &"<redacted>")
            .field("default_hash_method", &self.default_hash_method)
            .field("salt_passwords", &self.salt_passwords)
            .field(
                "cookie_secret",
                &self.cookie_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
