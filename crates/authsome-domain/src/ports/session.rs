//! Session Store Port
//!
//! Defines the contract for the server-side, client-scoped session.

use crate::error::Result;
use crate::value_objects::Identity;
use async_trait::async_trait;

/// Key-value store scoped to one client, durable across its requests
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the identity stored under `key`
    async fn read(&self, key: &str) -> Result<Option<Identity>>;

    /// Store `identity` under `key`, replacing any previous value
    async fn write(&self, key: &str, identity: &Identity) -> Result<()>;

    /// Remove the entry under `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}
