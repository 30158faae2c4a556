//! Persistence Manager Use Case
//!
//! Issues rotating persistence tokens into the cookie store and takes them
//! back out exactly once.

use crate::context::RequestContext;
use authsome_domain::error::{Error, Result};
use authsome_domain::ports::TokenIssuer;
use authsome_domain::{PersistenceToken, Settings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Issues and consumes single-use persistence tokens
#[derive(Clone)]
pub struct PersistenceManager {
    settings: Arc<Settings>,
    issuer: Option<Arc<dyn TokenIssuer>>,
    backend_name: String,
}

impl PersistenceManager {
    /// Create a persistence manager
    ///
    /// `issuer` may be absent for deployments that never persist logins;
    /// issuing then fails with `Error::NotImplemented`.
    pub fn new<S: Into<String>>(
        settings: Arc<Settings>,
        issuer: Option<Arc<dyn TokenIssuer>>,
        backend_name: S,
    ) -> Self {
        Self {
            settings,
            issuer,
            backend_name: backend_name.into(),
        }
    }

    /// Whether a token issuer is configured
    pub fn can_issue(&self) -> bool {
        self.issuer.is_some()
    }

    /// Issue a fresh token for the cached identity and store it in the cookie
    ///
    /// The identity must already be resolved into the request cache.
    /// Returns the cookie store's write flag.
    pub async fn issue(&self, ctx: &mut RequestContext, duration: &str) -> Result<bool> {
        let issuer = self
            .issuer
            .as_ref()
            .ok_or_else(|| Error::not_implemented(&self.backend_name, "issue_token"))?;

        let identity = ctx
            .cache()
            .get(self.settings.configure_key())
            .cloned()
            .ok_or_else(|| {
                Error::invalid_state("cannot persist a login without an active identity")
            })?;

        let token = issuer.issue_token(&identity, duration).await?;
        let value = PersistenceToken::new(token, duration).to_string();

        let cookie_key = self.settings.cookie_key();
        let written = ctx.cookies().write(cookie_key, &value, true, duration).await?;
        if written {
            info!(cookie_key, duration, "Issued persistence token");
        } else {
            warn!(cookie_key, duration, "Cookie store refused persistence token");
        }
        Ok(written)
    }

    /// Read the persistence token and delete it from the cookie store
    ///
    /// The cookie is deleted as soon as it is read, whatever happens next.
    /// Unreadable and malformed values read as "no token" and are deleted
    /// too.
    pub async fn take(&self, ctx: &RequestContext) -> Option<PersistenceToken> {
        let cookie_key = self.settings.cookie_key();

        let raw = match ctx.cookies().read(cookie_key).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                warn!(cookie_key, error = %e, "Discarding unreadable persistence cookie");
                self.discard(ctx, cookie_key).await;
                return None;
            }
        };

        self.discard(ctx, cookie_key).await;

        let token = PersistenceToken::parse(&raw);
        if token.is_none() {
            debug!(cookie_key, "Discarding malformed persistence token");
        }
        token
    }

    async fn discard(&self, ctx: &RequestContext, cookie_key: &str) {
        if let Err(e) = ctx.cookies().delete(cookie_key).await {
            warn!(cookie_key, error = %e, "Failed to delete persistence cookie");
        }
    }
}
