//! Request-scoped state

use authsome_domain::Identity;
use authsome_domain::ports::{SessionStore, TokenCookieStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolved identities for the lifetime of one request
///
/// Keyed by the configure key so several models can be resolved within the
/// same request without overwriting each other. Empty identities are never
/// stored.
#[derive(Debug, Default, Clone)]
pub struct RequestIdentityCache {
    entries: HashMap<String, Identity>,
}

impl RequestIdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached identity under `key`
    pub fn get(&self, key: &str) -> Option<&Identity> {
        self.entries.get(key)
    }

    /// Cache `identity` under `key`; an empty identity clears the entry
    pub fn put<K: Into<String>>(&mut self, key: K, identity: Identity) {
        let key = key.into();
        match identity.non_empty() {
            Some(identity) => {
                self.entries.insert(key, identity);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every cached identity
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one request needs to resolve and mutate its identity
///
/// Holds the per-request cache plus handles to the stores scoped to the
/// requesting client. Build one per request and drop it when the request
/// ends; long-lived workers that reuse a context must call
/// [`RequestContext::reset`] between requests.
pub struct RequestContext {
    cache: RequestIdentityCache,
    session: Arc<dyn SessionStore>,
    cookies: Arc<dyn TokenCookieStore>,
}

impl RequestContext {
    pub fn new(session: Arc<dyn SessionStore>, cookies: Arc<dyn TokenCookieStore>) -> Self {
        Self {
            cache: RequestIdentityCache::new(),
            session,
            cookies,
        }
    }

    pub fn cache(&self) -> &RequestIdentityCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut RequestIdentityCache {
        &mut self.cache
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn cookies(&self) -> &Arc<dyn TokenCookieStore> {
        &self.cookies
    }

    /// End-of-request teardown
    pub fn reset(&mut self) {
        self.cache.reset();
    }
}
