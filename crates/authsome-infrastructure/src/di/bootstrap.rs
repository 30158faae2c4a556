//! Bootstrap - builds a ready-to-use `Authsome` from `AppConfig`
//!
//! ```text
//! AppConfig → HashService ─┐
//!           → CryptoService ┼→ MemoryCredentialBackend → Authsome
//!           → SessionRegistry, cookie jars (per client)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//!
//! // Per request: the client's session and cookies
//! let jar = context.new_cookie_jar();
//! let mut ctx = context.request_context(&session_id, jar);
//! let identity = context.authsome().identity(&mut ctx).await?;
//! ```

use crate::config::AppConfig;
use authsome_application::{Authsome, RequestContext};
use authsome_domain::error::Result;
use authsome_domain::ports::{CryptoProvider, SessionStore, TokenCookieStore};
use authsome_providers::{
    CryptoService, HashService, MemoryCookieJar, MemoryCredentialBackend, SessionRegistry,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Application context holding the facade and its reference adapters
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    authsome: Authsome,
    backend: Arc<MemoryCredentialBackend>,
    hasher: Arc<HashService>,
    crypto: Arc<CryptoService>,
    sessions: Arc<SessionRegistry>,
}

impl AppContext {
    pub fn authsome(&self) -> &Authsome {
        &self.authsome
    }

    /// The bundled credential backend, for registering users
    pub fn backend(&self) -> Arc<MemoryCredentialBackend> {
        Arc::clone(&self.backend)
    }

    pub fn hasher(&self) -> Arc<HashService> {
        Arc::clone(&self.hasher)
    }

    pub fn crypto(&self) -> Arc<CryptoService> {
        Arc::clone(&self.crypto)
    }

    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }

    /// An empty cookie jar sealing values with the deployment key
    pub fn new_cookie_jar(&self) -> Arc<MemoryCookieJar> {
        let crypto: Arc<dyn CryptoProvider> = self.crypto.clone();
        Arc::new(MemoryCookieJar::with_crypto(crypto))
    }

    /// A request context for `session_id` using the client's cookie jar
    pub fn request_context(&self, session_id: &str, cookies: Arc<MemoryCookieJar>) -> RequestContext {
        let session: Arc<dyn SessionStore> = self.sessions.get_or_create(session_id);
        let cookies: Arc<dyn TokenCookieStore> = cookies;
        RequestContext::new(session, cookies)
    }
}

/// Initialize the application context from configuration
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    info!(model = %config.auth.model, "Initializing Authsome");

    let hasher = Arc::new(
        HashService::new(config.security.salt.clone())
            .with_bcrypt_cost(config.security.bcrypt_cost),
    );

    let crypto = Arc::new(match &config.security.cookie_secret {
        Some(secret) => CryptoService::from_hex(secret)?,
        None => {
            warn!("No cookie secret configured; persistent logins will not survive a restart");
            CryptoService::new(CryptoService::generate_master_key())?
        }
    });

    let mut backend = MemoryCredentialBackend::new(config.auth.model.clone(), hasher.clone())
        .with_hash_method(
            config.security.default_hash_method.clone(),
            config.security.salt_passwords,
        );
    if let Some(guest) = config.guest.identity(&config.auth.model) {
        backend = backend.with_guest(guest);
    }
    let backend = Arc::new(backend);

    let authsome = Authsome::builder()
        .settings(config.auth.clone())
        .backend_with_tokens(Arc::clone(&backend))
        .password_hasher(hasher.clone())
        .build()?;

    info!(
        hash_method = %config.security.default_hash_method,
        guest = config.guest.enabled,
        "Authsome ready"
    );

    Ok(AppContext {
        config: Arc::new(config),
        authsome,
        backend,
        hasher,
        crypto,
        sessions: Arc::new(SessionRegistry::new()),
    })
}
