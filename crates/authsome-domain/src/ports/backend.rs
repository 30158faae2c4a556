//! Credential Backend Ports
//!
//! Defines the contract an identity-providing backend must satisfy.

use crate::error::Result;
use crate::value_objects::{Credentials, Identity};
use async_trait::async_trait;

/// Validates credentials and produces identities
///
/// # Contract
///
/// - `Ok(Some(identity))`: the credentials are valid.
/// - `Ok(None)`: explicit authentication failure. This is not an error.
/// - `Err(Error::NotImplemented { .. })`: the backend cannot handle this
///   credential type at all.
///
/// Cookie credentials carry a single-use token. A backend should invalidate
/// the token as part of authenticating it, whether or not it is accepted.
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    /// Backend name used in logs and errors (usually the model name)
    fn name(&self) -> &str;

    /// Authenticate the given credentials
    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<Identity>>;
}

/// Issues persistence tokens for persistent logins
///
/// Tokens must be unguessable and valid for a single use. They may contain
/// colons: the cookie format keeps everything before the last colon.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a token for `identity`, valid for `duration` (e.g. `"2 weeks"`)
    async fn issue_token(&self, identity: &Identity, duration: &str) -> Result<String>;
}
