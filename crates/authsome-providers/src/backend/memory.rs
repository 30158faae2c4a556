//! In-memory credential backend
//!
//! Users live in a `DashMap` keyed by username. Persistence tokens are kept
//! only as SHA-256 digests and are removed the moment they are presented,
//! so a token authenticates at most once even under concurrent requests.
//! Expired tokens that are never presented are purged whenever a new token
//! is issued, or on demand through `purge_expired_tokens`.

use crate::crypto::{TokenGenerator, sha256_hex};
use crate::duration::parse_duration;
use async_trait::async_trait;
use authsome_domain::constants::{DEFAULT_HASH_METHOD, DEFAULT_MODEL, PATH_SEPARATOR};
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::{CredentialBackend, PasswordHasher, TokenIssuer};
use authsome_domain::{Credentials, Identity};
use dashmap::DashMap;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Payload key holding the username in `"credentials"` logins
pub const USERNAME_FIELD: &str = "username";

/// Payload key holding the password in `"credentials"` logins
pub const PASSWORD_FIELD: &str = "password";

/// A stored user
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    /// Extra fields exposed on the identity
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone)]
struct TokenRecord {
    user_id: u64,
    expires_at: Option<Instant>,
}

impl TokenRecord {
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// `CredentialBackend` and `TokenIssuer` over in-memory users
pub struct MemoryCredentialBackend {
    model: String,
    hasher: Arc<dyn PasswordHasher>,
    hash_method: String,
    salt: bool,
    users: DashMap<String, UserRecord>,
    tokens: DashMap<String, TokenRecord>,
    guest: Option<Identity>,
}

impl MemoryCredentialBackend {
    /// Backend for `model`, hashing passwords with `hasher`
    ///
    /// Passwords are hashed with the salted default method until
    /// [`MemoryCredentialBackend::with_hash_method`] says otherwise.
    pub fn new<S: Into<String>>(model: S, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            model: model.into(),
            hasher,
            hash_method: DEFAULT_HASH_METHOD.to_string(),
            salt: true,
            users: DashMap::new(),
            tokens: DashMap::new(),
            guest: None,
        }
    }

    /// Backend for the default `User` model
    pub fn for_default_model(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self::new(DEFAULT_MODEL, hasher)
    }

    pub fn with_hash_method<S: Into<String>>(mut self, method: S, salt: bool) -> Self {
        self.hash_method = method.into();
        self.salt = salt;
        self
    }

    /// Identity returned for `"guest"` credentials
    pub fn with_guest(mut self, guest: Identity) -> Self {
        self.guest = Some(guest);
        self
    }

    /// Register a user, hashing `password` with the configured method
    pub fn add_user(
        &self,
        id: u64,
        username: &str,
        password: &str,
        fields: Map<String, Value>,
    ) -> Result<()> {
        if username.is_empty() {
            return Err(Error::invalid_argument("username cannot be empty"));
        }
        let password_hash = self.hasher.hash(password, &self.hash_method, self.salt)?;
        self.insert_user(UserRecord {
            id,
            username: username.to_string(),
            password_hash,
            fields,
        });
        Ok(())
    }

    /// Register a user whose password is already hashed
    pub fn insert_user(&self, record: UserRecord) {
        self.users.insert(record.username.clone(), record);
    }

    /// Remove a user and every persistence token issued for them
    pub fn remove_user(&self, username: &str) -> Option<UserRecord> {
        let (_, record) = self.users.remove(username)?;
        self.revoke_tokens(record.id);
        Some(record)
    }

    /// Drop every outstanding token of user `id`; returns how many were dropped
    pub fn revoke_tokens(&self, user_id: u64) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| token.user_id != user_id);
        before.saturating_sub(self.tokens.len())
    }

    /// Drop tokens past their expiry; returns how many were dropped
    pub fn purge_expired_tokens(&self) -> usize {
        let now = Instant::now();
        let before = self.tokens.len();
        self.tokens.retain(|_, token| !token.is_expired_at(now));
        let purged = before.saturating_sub(self.tokens.len());
        if purged > 0 {
            debug!(model = %self.model, purged, "Purged expired persistence tokens");
        }
        purged
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Outstanding persistence tokens, including expired ones not yet purged
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn identity_for(&self, record: &UserRecord) -> Identity {
        let mut fields = record.fields.clone();
        fields.insert("id".to_string(), json!(record.id));
        fields.insert(USERNAME_FIELD.to_string(), json!(record.username));

        let mut identity = Identity::new();
        identity.insert(self.model.clone(), Value::Object(fields));
        identity
    }

    fn find_by_id(&self, user_id: u64) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|entry| entry.id == user_id)
            .map(|entry| entry.value().clone())
    }

    fn login_with_password(&self, payload: &Value) -> Result<Option<Identity>> {
        let (Some(username), Some(password)) = (
            payload.get(USERNAME_FIELD).and_then(Value::as_str),
            payload.get(PASSWORD_FIELD).and_then(Value::as_str),
        ) else {
            return Ok(None);
        };

        let Some(record) = self.users.get(username).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        if self
            .hasher
            .verify(password, &record.password_hash, &self.hash_method, self.salt)?
        {
            Ok(Some(self.identity_for(&record)))
        } else {
            Ok(None)
        }
    }

    fn login_with_token(&self, token: &str) -> Option<Identity> {
        let (_, record) = self.tokens.remove(&sha256_hex(token.as_bytes()))?;
        if record.is_expired_at(Instant::now()) {
            debug!(model = %self.model, "Expired persistence token presented");
            return None;
        }
        self.find_by_id(record.user_id)
            .map(|user| self.identity_for(&user))
    }
}

#[async_trait]
impl CredentialBackend for MemoryCredentialBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Identity>> {
        match credentials {
            Credentials::Payload(payload) => self.login_with_password(payload),
            Credentials::Cookie { token, .. } => Ok(self.login_with_token(token)),
            Credentials::Guest => Ok(self.guest.clone()),
            Credentials::Custom { kind, .. } => Err(Error::not_implemented(
                &self.model,
                format!("authenticate({kind})"),
            )),
        }
    }
}

#[async_trait]
impl TokenIssuer for MemoryCredentialBackend {
    async fn issue_token(&self, identity: &Identity, duration: &str) -> Result<String> {
        let path = format!("{}{PATH_SEPARATOR}id", self.model);
        let user_id = identity
            .extract(&path)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                Error::invalid_argument(format!("identity has no numeric '{path}'"))
            })?;
        let lifetime = parse_duration(duration)?;
        self.purge_expired_tokens();

        let token = TokenGenerator::persistence_token();
        self.tokens.insert(
            sha256_hex(token.as_bytes()),
            TokenRecord {
                user_id,
                expires_at: Instant::now().checked_add(lifetime),
            },
        );
        debug!(model = %self.model, "Issued persistence token");
        Ok(token)
    }
}

impl std::fmt::Debug for MemoryCredentialBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCredentialBackend")
            .field("model", &self.model)
            .field("hash_method", &self.hash_method)
            .field("users", &self.users.len())
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}
