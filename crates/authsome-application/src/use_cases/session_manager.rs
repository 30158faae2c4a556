//! Session Manager Use Case
//!
//! Logs actors in through the credential backend and tears authentication
//! state down on logout.

use crate::context::RequestContext;
use authsome_domain::error::Result;
use authsome_domain::ports::CredentialBackend;
use authsome_domain::{Credentials, Identity, Settings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Login/logout operations over the request cache and session store
#[derive(Clone)]
pub struct SessionManager {
    settings: Arc<Settings>,
    backend: Arc<dyn CredentialBackend>,
}

impl SessionManager {
    /// Create new session manager with injected dependencies
    pub fn new(settings: Arc<Settings>, backend: Arc<dyn CredentialBackend>) -> Self {
        Self { settings, backend }
    }

    /// Name of the underlying credential backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Authenticate `credentials` and make the result the active identity
    ///
    /// Returns `Ok(None)` when the backend rejects the credentials. In that
    /// case neither the request cache nor the session is touched. The cache
    /// only changes once the session write has succeeded.
    pub async fn login(
        &self,
        ctx: &mut RequestContext,
        credentials: Credentials,
    ) -> Result<Option<Identity>> {
        let backend = self.backend.name();
        let kind = credentials.kind().to_string();

        let Some(identity) = self
            .backend
            .authenticate(&credentials)
            .await?
            .and_then(Identity::non_empty)
        else {
            debug!(backend, kind = %kind, "Credential backend rejected login");
            return Ok(None);
        };

        ctx.session()
            .write(self.settings.session_key(), &identity)
            .await?;
        ctx.cache_mut()
            .put(self.settings.configure_key(), identity.clone());

        info!(backend, kind = %kind, "Login succeeded");
        Ok(Some(identity))
    }

    /// Forget the active identity
    ///
    /// Clears the request cache and the session entry, and the persistence
    /// cookie when `clear_cookie_on_logout` is set. Always returns `true`;
    /// only a failing session store surfaces as an error.
    pub async fn logout(&self, ctx: &mut RequestContext) -> Result<bool> {
        ctx.cache_mut().clear(self.settings.configure_key());
        ctx.session().delete(self.settings.session_key()).await?;

        if self.settings.clear_cookie_on_logout {
            let cookie_key = self.settings.cookie_key();
            if let Err(e) = ctx.cookies().delete(cookie_key).await {
                warn!(cookie_key, error = %e, "Failed to clear persistence cookie on logout");
            }
        }

        info!(backend = self.backend.name(), "Logged out");
        Ok(true)
    }
}
