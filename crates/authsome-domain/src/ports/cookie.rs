//! Token Cookie Store Port
//!
//! Defines the contract for client-held cookie storage.

use crate::error::Result;
use async_trait::async_trait;

/// Client-held storage for signed/encrypted values with an expiry
///
/// The server cannot read a value without its secret, and the client keeps
/// it until `ttl` elapses.
#[async_trait]
pub trait TokenCookieStore: Send + Sync {
    /// Read the decrypted value under `key`; expired values read as `None`
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    ///
    /// # Arguments
    ///
    /// * `encrypt` - Whether the value must be encrypted at rest
    /// * `ttl` - Relative lifetime such as `"2 weeks"`; empty for no expiry
    ///
    /// # Returns
    ///
    /// Whether the value was stored
    async fn write(&self, key: &str, value: &str, encrypt: bool, ttl: &str) -> Result<bool>;

    /// Remove the value under `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}
