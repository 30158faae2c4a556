//! Request cache tests

use crate::test_utils::{member, MapSessionStore, RecordingCookieStore};
use authsome_application::{RequestContext, RequestIdentityCache};
use authsome_domain::Identity;
use std::sync::Arc;

#[test]
fn test_put_and_get() {
    let mut cache = RequestIdentityCache::new();
    cache.put("User", member(1));

    assert_eq!(cache.get("User"), Some(&member(1)));
    assert!(cache.get("Admin").is_none());
}

#[test]
fn test_putting_empty_identity_clears_entry() {
    let mut cache = RequestIdentityCache::new();
    cache.put("User", member(1));

    cache.put("User", Identity::new());

    assert!(cache.is_empty());
}

#[test]
fn test_models_are_cached_independently() {
    let mut cache = RequestIdentityCache::new();
    cache.put("User", member(1));
    cache.put("Admin", member(2));

    cache.clear("User");

    assert!(cache.get("User").is_none());
    assert_eq!(cache.get("Admin"), Some(&member(2)));
}

#[test]
fn test_context_reset_drops_cache() {
    let mut ctx = RequestContext::new(
        Arc::new(MapSessionStore::default()),
        Arc::new(RecordingCookieStore::default()),
    );
    ctx.cache_mut().put("User", member(1));

    ctx.reset();

    assert!(ctx.cache().is_empty());
}
