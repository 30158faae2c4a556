//! Identity resolution fallback chain tests

use crate::test_utils::{
    Harness, MapSessionStore, RecordingCookieStore, ScriptedBackend, guest, identity, member,
};
use authsome_application::Authsome;
use authsome_domain::ports::{SessionStore, TokenCookieStore};
use authsome_domain::{Credentials, Error, Settings};
use serde_json::json;
use std::sync::Arc;

const KEY: &str = "User";

#[tokio::test]
async fn test_session_wins_without_consulting_cookie() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_guest(guest()),
        MapSessionStore::with_entry(KEY, member(7)),
        RecordingCookieStore::with_value(KEY, "abc123:2 weeks"),
    );
    let mut ctx = harness.request();

    let resolved = harness.authsome.identity(&mut ctx).await.unwrap();

    assert_eq!(resolved, member(7));
    assert_eq!(harness.cookies.reads(), 0);
    assert!(harness.backend.calls().is_empty());
    assert_eq!(ctx.cache().get(KEY), Some(&member(7)));
}

#[tokio::test]
async fn test_cookie_login_scenario() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new()
            .with_guest(guest())
            .with_token("abc123", identity(json!({"User": {"id": 1}}))),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "abc123:2 weeks"),
    );
    let mut ctx = harness.request();

    let resolved = harness.authsome.identity(&mut ctx).await.unwrap();

    assert_eq!(resolved, identity(json!({"User": {"id": 1}})));
    assert_eq!(
        harness.backend.calls()[0].1,
        Credentials::Cookie {
            token: "abc123".to_string(),
            duration: "2 weeks".to_string(),
        }
    );
    assert_eq!(harness.cookies.deletes(), vec![KEY.to_string()]);
    assert_eq!(harness.session.entry(KEY), Some(resolved));

    let writes = harness.cookies.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].key, KEY);
    assert_eq!(writes[0].value, "tok-1:2 weeks");
    assert!(writes[0].encrypt);
    assert_eq!(writes[0].ttl, "2 weeks");
}

#[tokio::test]
async fn test_rotated_token_differs_from_consumed_one() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_token("abc123", member(1)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "abc123:2 weeks"),
    );
    let mut ctx = harness.request();

    harness.authsome.identity(&mut ctx).await.unwrap();

    let rotated = harness.cookies.value(KEY).expect("a fresh token is stored");
    assert_ne!(rotated, "abc123:2 weeks");
    assert!(!harness.backend.knows_token("abc123"));
    assert!(harness.backend.knows_token("tok-1"));
}

#[tokio::test]
async fn test_token_cannot_be_replayed() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new()
            .with_guest(guest())
            .with_token("abc123", member(1)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "abc123:2 weeks"),
    );

    let mut first = harness.request();
    assert_eq!(harness.authsome.identity(&mut first).await.unwrap(), member(1));

    // Same client, session gone, original cookie presented again.
    harness.session.delete(KEY).await.unwrap();
    harness.cookies.set(KEY, "abc123:2 weeks");

    let mut second = harness.request();
    assert_eq!(harness.authsome.identity(&mut second).await.unwrap(), guest());
    assert_eq!(harness.backend.call_kinds(), vec!["cookie", "cookie", "guest"]);
    assert_eq!(harness.backend.issued().len(), 1);
    assert!(harness.cookies.value(KEY).is_none());
}

#[tokio::test]
async fn test_rotated_token_logs_in_on_next_visit() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_token("abc123", member(1)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "abc123:1 day"),
    );

    let mut first = harness.request();
    harness.authsome.identity(&mut first).await.unwrap();

    harness.session.delete(KEY).await.unwrap();
    let mut second = harness.request();
    assert_eq!(harness.authsome.identity(&mut second).await.unwrap(), member(1));
    assert_eq!(harness.cookies.value(KEY).as_deref(), Some("tok-2:1 day"));
}

#[tokio::test]
async fn test_guest_scenario() {
    let harness = Harness::new(ScriptedBackend::new().with_guest(guest()));
    let mut ctx = harness.request();

    let resolved = harness.authsome.identity(&mut ctx).await.unwrap();

    assert_eq!(resolved, identity(json!({"User": {"id": 0, "guest": true}})));
    assert_eq!(ctx.cache().get(KEY), Some(&guest()));
    assert_eq!(harness.backend.call_kinds(), vec!["guest"]);
    assert!(harness.cookies.writes().is_empty());
}

#[tokio::test]
async fn test_identity_is_cached_for_the_request() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new(),
        MapSessionStore::with_entry(KEY, member(3)),
        RecordingCookieStore::default(),
    );
    let mut ctx = harness.request();

    harness.authsome.identity(&mut ctx).await.unwrap();
    harness.authsome.identity(&mut ctx).await.unwrap();

    assert_eq!(harness.session.reads(), 1);
}

#[tokio::test]
async fn test_malformed_cookie_falls_through_to_guest() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_guest(guest()),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "no-delimiter-here"),
    );
    let mut ctx = harness.request();

    assert_eq!(harness.authsome.identity(&mut ctx).await.unwrap(), guest());
    assert_eq!(harness.cookies.deletes(), vec![KEY.to_string()]);
    assert_eq!(harness.backend.call_kinds(), vec!["guest"]);
}

#[tokio::test]
async fn test_rejected_token_is_deleted_and_not_rotated() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_guest(guest()),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "stale:2 weeks"),
    );
    let mut ctx = harness.request();

    assert_eq!(harness.authsome.identity(&mut ctx).await.unwrap(), guest());
    assert!(harness.cookies.value(KEY).is_none());
    assert!(harness.cookies.writes().is_empty());
    assert_eq!(harness.backend.call_kinds(), vec!["cookie", "guest"]);
}

#[tokio::test]
async fn test_unreadable_cookie_degrades_to_guest() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_guest(guest()),
        MapSessionStore::default(),
        RecordingCookieStore::failing_reads(),
    );
    let mut ctx = harness.request();

    assert_eq!(harness.authsome.identity(&mut ctx).await.unwrap(), guest());
    assert_eq!(harness.backend.call_kinds(), vec!["guest"]);
}

#[tokio::test]
async fn test_token_containing_colons() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_token("v1:abc", member(2)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "v1:abc:3 days"),
    );
    let mut ctx = harness.request();

    assert_eq!(harness.authsome.identity(&mut ctx).await.unwrap(), member(2));
    assert_eq!(harness.backend.issued()[0].1, "3 days");
}

#[tokio::test]
async fn test_failing_guest_login_is_a_configuration_error() {
    let harness = Harness::new(ScriptedBackend::new());
    let mut ctx = harness.request();

    let err = harness.authsome.identity(&mut ctx).await.unwrap_err();

    match err {
        Error::Configuration { message, .. } => assert_eq!(message, "Unable to initialize user"),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
    assert!(ctx.cache().is_empty());
}

#[tokio::test]
async fn test_cookie_login_without_token_issuer_is_not_implemented() {
    let backend = Arc::new(ScriptedBackend::new().with_token("abc123", member(1)));
    let authsome = Authsome::builder()
        .backend(backend.clone())
        .build()
        .unwrap();
    let session = Arc::new(MapSessionStore::default());
    let cookies = Arc::new(RecordingCookieStore::with_value(KEY, "abc123:2 weeks"));
    let mut ctx = authsome_application::RequestContext::new(
        session.clone() as Arc<dyn SessionStore>,
        cookies.clone() as Arc<dyn TokenCookieStore>,
    );

    let err = authsome.identity(&mut ctx).await.unwrap_err();

    assert!(matches!(err, Error::NotImplemented { ref operation, .. } if operation == "issue_token"));
    assert!(cookies.value(KEY).is_none());
}

#[tokio::test]
async fn test_refused_rotation_keeps_the_login() {
    let harness = Harness::with(
        Settings::default(),
        ScriptedBackend::new().with_token("abc123", member(1)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value(KEY, "abc123:2 weeks").refusing_writes(),
    );
    let mut ctx = harness.request();

    assert_eq!(harness.authsome.identity(&mut ctx).await.unwrap(), member(1));
    assert_eq!(harness.cookies.writes().len(), 1);
    assert!(harness.cookies.value(KEY).is_none());
}

#[tokio::test]
async fn test_custom_keys_are_used_for_every_store() {
    let settings = Settings::default()
        .with_configure_key("current")
        .with_session_key("Auth.User")
        .with_cookie_key("remember");
    let harness = Harness::with(
        settings,
        ScriptedBackend::new().with_token("abc123", member(4)),
        MapSessionStore::default(),
        RecordingCookieStore::with_value("remember", "abc123:1 week"),
    );
    let mut ctx = harness.request();

    harness.authsome.identity(&mut ctx).await.unwrap();

    assert_eq!(ctx.cache().get("current"), Some(&member(4)));
    assert_eq!(harness.session.entry("Auth.User"), Some(member(4)));
    assert_eq!(harness.cookies.value("remember").as_deref(), Some("tok-1:1 week"));
    assert!(harness.session.entry(KEY).is_none());
}
