//! Identity Resolver Use Case
//!
//! Works out the active identity for a request by walking the fallback
//! chain, first hit wins:
//!
//! ```text
//! request cache → session → persistence cookie → guest account
//! ```
//!
//! A successful cookie login rotates the token: the consumed one is gone
//! and a freshly issued one takes its place.

use crate::context::RequestContext;
use crate::use_cases::{PersistenceManager, SessionManager};
use authsome_domain::error::{Error, Result};
use authsome_domain::{Credentials, Identity, Settings};
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs the active-identity fallback chain
#[derive(Clone)]
pub struct IdentityResolver {
    settings: Arc<Settings>,
    sessions: SessionManager,
    persistence: PersistenceManager,
}

impl IdentityResolver {
    pub fn new(
        settings: Arc<Settings>,
        sessions: SessionManager,
        persistence: PersistenceManager,
    ) -> Self {
        Self {
            settings,
            sessions,
            persistence,
        }
    }

    /// Resolve the active identity, caching it for the rest of the request
    ///
    /// Fails only when even the guest account yields nothing, or when a
    /// collaborator reports a misconfiguration.
    pub async fn resolve(&self, ctx: &mut RequestContext) -> Result<Identity> {
        let key = self.settings.configure_key();
        if let Some(identity) = ctx.cache().get(key) {
            return Ok(identity.clone());
        }

        if !self.use_session(ctx).await? && !self.use_cookie_token(ctx).await? {
            self.use_guest_account(ctx).await?;
        }

        ctx.cache()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::configuration("Unable to initialize user"))
    }

    async fn use_session(&self, ctx: &mut RequestContext) -> Result<bool> {
        let session_key = self.settings.session_key();
        let Some(identity) = ctx
            .session()
            .read(session_key)
            .await?
            .and_then(Identity::non_empty)
        else {
            return Ok(false);
        };

        ctx.cache_mut()
            .put(self.settings.configure_key(), identity);
        debug!(session_key, "Identity resolved from session");
        Ok(true)
    }

    async fn use_cookie_token(&self, ctx: &mut RequestContext) -> Result<bool> {
        let Some(token) = self.persistence.take(ctx).await else {
            return Ok(false);
        };
        let duration = token.duration().to_string();

        if self
            .sessions
            .login(ctx, Credentials::from(token))
            .await?
            .is_none()
        {
            debug!("Persistence token rejected");
            return Ok(false);
        }

        if !self.persistence.issue(ctx, &duration).await? {
            warn!(duration = %duration, "Logged in from persistence token but could not rotate it");
        }
        debug!("Identity resolved from persistence token");
        Ok(true)
    }

    async fn use_guest_account(&self, ctx: &mut RequestContext) -> Result<()> {
        if self.sessions.login(ctx, Credentials::Guest).await?.is_none() {
            return Err(Error::configuration("Unable to initialize user"));
        }
        debug!("Falling back to guest identity");
        Ok(())
    }
}
