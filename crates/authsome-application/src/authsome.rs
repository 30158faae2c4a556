//! Authsome facade
//!
//! One value per deployment bundling the settings, the credential backend
//! and the use cases. Pass it to handlers explicitly (or keep it in the web
//! framework's shared state); there is no global instance.

use crate::accessor::field_value;
use crate::context::RequestContext;
use crate::use_cases::{IdentityResolver, PersistenceManager, SessionManager};
use authsome_domain::constants::DEFAULT_HASH_METHOD;
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::{CredentialBackend, PasswordHasher, TokenIssuer};
use authsome_domain::{Credentials, Identity, Settings};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Per-deployment authentication entry point
#[derive(Clone)]
pub struct Authsome {
    settings: Arc<Settings>,
    sessions: SessionManager,
    persistence: PersistenceManager,
    resolver: IdentityResolver,
    hasher: Option<Arc<dyn PasswordHasher>>,
}

impl Authsome {
    pub fn builder() -> AuthsomeBuilder {
        AuthsomeBuilder::new()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn persistence_manager(&self) -> &PersistenceManager {
        &self.persistence
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// The active identity, resolving it on first access
    pub async fn identity(&self, ctx: &mut RequestContext) -> Result<Identity> {
        self.resolver.resolve(ctx).await
    }

    /// A field of the active identity, or the whole identity for `None`
    ///
    /// Bare names are tried as top-level keys first, then qualified with
    /// the model name (`"id"` → `"User.id"`).
    pub async fn get(&self, ctx: &mut RequestContext, field: Option<&str>) -> Result<Option<Value>> {
        let identity = self.resolver.resolve(ctx).await?;
        Ok(field_value(&identity, &self.settings.model, field))
    }

    /// Log in with the given credentials
    ///
    /// A bare JSON payload is treated as `"credentials"`-type credentials.
    /// `Ok(None)` means the backend rejected them.
    pub async fn login<C: Into<Credentials>>(
        &self,
        ctx: &mut RequestContext,
        credentials: C,
    ) -> Result<Option<Identity>> {
        self.sessions.login(ctx, credentials.into()).await
    }

    pub async fn logout(&self, ctx: &mut RequestContext) -> Result<bool> {
        self.sessions.logout(ctx).await
    }

    /// Keep the active identity logged in for `duration`
    ///
    /// Defaults to the configured `default_persist_duration`. Resolves the
    /// active identity first, so a guest can be persisted too.
    pub async fn persist(&self, ctx: &mut RequestContext, duration: Option<&str>) -> Result<bool> {
        let duration = duration.unwrap_or(&self.settings.default_persist_duration);
        if !self.persistence.can_issue() {
            return Err(Error::not_implemented(
                self.sessions.backend_name(),
                "issue_token",
            ));
        }
        self.resolver.resolve(ctx).await?;
        debug!(duration, "Persisting login");
        self.persistence.issue(ctx, duration).await
    }

    /// Hash a password with the named method, optionally salted
    pub fn hash(&self, password: &str, method: &str, salt: bool) -> Result<String> {
        self.password_hasher()?.hash(password, method, salt)
    }

    /// Hash a password with the default method (`sha1`) and salting
    pub fn hash_default(&self, password: &str) -> Result<String> {
        self.hash(password, DEFAULT_HASH_METHOD, true)
    }

    fn password_hasher(&self) -> Result<&Arc<dyn PasswordHasher>> {
        self.hasher
            .as_ref()
            .ok_or_else(|| Error::not_implemented("Authsome", "hash"))
    }
}

/// Builder for [`Authsome`]
///
/// A credential backend is mandatory; the token issuer and password hasher
/// are optional capabilities checked when first used.
#[derive(Default)]
pub struct AuthsomeBuilder {
    settings: Settings,
    backend: Option<Arc<dyn CredentialBackend>>,
    issuer: Option<Arc<dyn TokenIssuer>>,
    hasher: Option<Arc<dyn PasswordHasher>>,
}

impl AuthsomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn backend(mut self, backend: Arc<dyn CredentialBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn token_issuer(mut self, issuer: Arc<dyn TokenIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Use one value as both credential backend and token issuer
    pub fn backend_with_tokens<B>(self, backend: Arc<B>) -> Self
    where
        B: CredentialBackend + TokenIssuer + 'static,
    {
        let issuer: Arc<dyn TokenIssuer> = backend.clone();
        self.backend(backend).token_issuer(issuer)
    }

    pub fn password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn build(self) -> Result<Authsome> {
        if self.settings.model.trim().is_empty() {
            return Err(Error::configuration("model name cannot be empty"));
        }
        let backend = self
            .backend
            .ok_or_else(|| Error::configuration("a credential backend is required"))?;

        let settings = Arc::new(self.settings);
        let sessions = SessionManager::new(Arc::clone(&settings), Arc::clone(&backend));
        let persistence =
            PersistenceManager::new(Arc::clone(&settings), self.issuer, backend.name());
        let resolver =
            IdentityResolver::new(Arc::clone(&settings), sessions.clone(), persistence.clone());

        Ok(Authsome {
            settings,
            sessions,
            persistence,
            resolver,
            hasher: self.hasher,
        })
    }
}
