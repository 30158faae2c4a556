//! In-memory cookie jar
//!
//! Stands in for one client's cookies. Values written with `encrypt = true`
//! are sealed with the configured `CryptoProvider` and only opened on read,
//! so an exported cookie is opaque to the client. TTLs are humantime strings
//! (`"2 weeks"`); an expired value reads as absent and is dropped.

use crate::constants::{AES_GCM_NONCE_SIZE, ENCRYPTED_COOKIE_PREFIX};
use crate::duration::parse_duration;
use async_trait::async_trait;
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::{CryptoProvider, EncryptedData, TokenCookieStore};
use base64::{Engine as _, engine::general_purpose};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

#[derive(Debug, Clone)]
enum StoredValue {
    Plain(String),
    Encrypted(EncryptedData),
}

#[derive(Debug, Clone)]
struct CookieEntry {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl CookieEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// One client's cookies, held in memory
#[derive(Default)]
pub struct MemoryCookieJar {
    entries: DashMap<String, CookieEntry>,
    crypto: Option<Arc<dyn CryptoProvider>>,
}

impl MemoryCookieJar {
    /// A jar that can only hold plain values
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar that encrypts values with `crypto` when asked to
    pub fn with_crypto(crypto: Arc<dyn CryptoProvider>) -> Self {
        Self {
            entries: DashMap::new(),
            crypto: Some(crypto),
        }
    }

    fn crypto(&self) -> Result<&Arc<dyn CryptoProvider>> {
        self.crypto.as_ref().ok_or_else(|| {
            Error::configuration("cookie encryption requires a crypto provider")
        })
    }

    /// Whether the live value under `key` is stored encrypted
    pub fn is_encrypted(&self, key: &str) -> bool {
        self.live_entry(key)
            .is_some_and(|entry| matches!(entry.value, StoredValue::Encrypted(_)))
    }

    /// The value as the client would see it
    ///
    /// Encrypted values are exported as `enc:` followed by the URL-safe
    /// base64 of nonce and ciphertext.
    pub fn export(&self, key: &str) -> Option<String> {
        self.live_entry(key).map(|entry| match entry.value {
            StoredValue::Plain(value) => value,
            StoredValue::Encrypted(data) => {
                let mut bytes = data.nonce;
                bytes.extend_from_slice(&data.ciphertext);
                format!(
                    "{ENCRYPTED_COOKIE_PREFIX}{}",
                    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
                )
            }
        })
    }

    /// Store a value as sent back by the client, in [`MemoryCookieJar::export`] form
    ///
    /// The value is kept without expiry; integrity is only checked on read.
    pub fn import(&self, key: &str, raw: &str) -> Result<()> {
        let value = match raw.strip_prefix(ENCRYPTED_COOKIE_PREFIX) {
            Some(encoded) => {
                let bytes = general_purpose::URL_SAFE_NO_PAD
                    .decode(encoded)
                    .map_err(|e| Error::crypto(format!("Malformed encrypted cookie: {e}")))?;
                if bytes.len() < AES_GCM_NONCE_SIZE {
                    return Err(Error::crypto("Malformed encrypted cookie: too short"));
                }
                let (nonce, ciphertext) = bytes.split_at(AES_GCM_NONCE_SIZE);
                StoredValue::Encrypted(EncryptedData::new(ciphertext.to_vec(), nonce.to_vec()))
            }
            None => StoredValue::Plain(raw.to_string()),
        };
        self.entries.insert(
            key.to_string(),
            CookieEntry {
                value,
                expires_at: None,
            },
        );
        Ok(())
    }

    /// Drop every expired value; returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn live_entry(&self, key: &str) -> Option<CookieEntry> {
        let now = Instant::now();
        let entry = self.entries.get(key).map(|entry| entry.clone())?;
        if entry.is_expired(now) {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
            return None;
        }
        Some(entry)
    }
}

#[async_trait]
impl TokenCookieStore for MemoryCookieJar {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let Some(entry) = self.live_entry(key) else {
            return Ok(None);
        };

        match entry.value {
            StoredValue::Plain(value) => Ok(Some(value)),
            StoredValue::Encrypted(data) => {
                let bytes = self.crypto()?.decrypt(&data)?;
                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|e| Error::crypto(format!("Cookie is not valid UTF-8: {e}")))
            }
        }
    }

    async fn write(&self, key: &str, value: &str, encrypt: bool, ttl: &str) -> Result<bool> {
        let expires_at = if ttl.trim().is_empty() {
            None
        } else {
            match parse_duration(ttl) {
                Ok(lifetime) => Instant::now().checked_add(lifetime),
                Err(e) => {
                    warn!(key, error = %e, "Refusing cookie with unparseable ttl");
                    return Ok(false);
                }
            }
        };

        let value = if encrypt {
            StoredValue::Encrypted(self.crypto()?.encrypt(value.as_bytes())?)
        } else {
            StoredValue::Plain(value.to_string())
        };

        self.entries
            .insert(key.to_string(), CookieEntry { value, expires_at });
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl std::fmt::Debug for MemoryCookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCookieJar")
            .field("entries", &self.entries.len())
            .field(
                "crypto",
                &self.crypto.as_ref().map(|crypto| crypto.provider_name()),
            )
            .finish()
    }
}
