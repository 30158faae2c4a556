//! Tests for the in-memory credential backend

use authsome_domain::{Credentials, Error, Identity};
use authsome_providers::{
    CredentialBackend, HashService, MemoryCredentialBackend, TokenIssuer, UserRecord,
};
use serde_json::{Map, json};
use std::sync::Arc;
use std::time::Duration;

fn backend() -> MemoryCredentialBackend {
    let backend = MemoryCredentialBackend::for_default_model(Arc::new(HashService::new("salt")))
        .with_guest(Identity::from_value(json!({"User": {"id": 0, "guest": true}})).unwrap());
    let mut fields = Map::new();
    fields.insert("email".to_string(), json!("alice@example.com"));
    backend.add_user(5, "alice", "secret", fields).unwrap();
    backend
}

fn cookie(token: &str) -> Credentials {
    Credentials::Cookie {
        token: token.to_string(),
        duration: "2 weeks".to_string(),
    }
}

#[tokio::test]
async fn test_password_login() {
    let backend = backend();

    let identity = backend
        .authenticate(&Credentials::password("alice", "secret"))
        .await
        .unwrap()
        .expect("valid credentials");

    assert_eq!(identity.extract("User.id"), Some(&json!(5)));
    assert_eq!(identity.extract("User.username"), Some(&json!("alice")));
    assert_eq!(identity.extract("User.email"), Some(&json!("alice@example.com")));
    assert!(identity.extract("User.password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_rejections() {
    let backend = backend();

    for credentials in [
        Credentials::password("alice", "wrong"),
        Credentials::password("bob", "secret"),
        Credentials::Payload(json!({"username": "alice"})),
    ] {
        assert_eq!(backend.authenticate(&credentials).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_stored_hash_uses_configured_method() {
    let backend = MemoryCredentialBackend::for_default_model(Arc::new(HashService::new("")))
        .with_hash_method("sha256", false);
    backend.insert_user(UserRecord {
        id: 1,
        username: "carol".to_string(),
        password_hash: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            .to_string(),
        fields: Map::new(),
    });

    assert!(
        backend
            .authenticate(&Credentials::password("carol", "abc"))
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_guest_login() {
    let backend = backend();

    let guest = backend.authenticate(&Credentials::Guest).await.unwrap().unwrap();

    assert_eq!(guest.extract("User.guest"), Some(&json!(true)));
}

#[tokio::test]
async fn test_guest_not_configured() {
    let backend = MemoryCredentialBackend::for_default_model(Arc::new(HashService::default()));

    assert_eq!(backend.authenticate(&Credentials::Guest).await.unwrap(), None);
}

#[tokio::test]
async fn test_issued_token_authenticates_once() {
    let backend = backend();
    let alice = backend
        .authenticate(&Credentials::password("alice", "secret"))
        .await
        .unwrap()
        .unwrap();

    let token = backend.issue_token(&alice, "2 weeks").await.unwrap();
    assert_eq!(backend.token_count(), 1);

    let first = backend.authenticate(&cookie(&token)).await.unwrap();
    let replay = backend.authenticate(&cookie(&token)).await.unwrap();

    assert_eq!(first, Some(alice));
    assert_eq!(replay, None);
    assert_eq!(backend.token_count(), 0);
}

#[tokio::test]
async fn test_tokens_are_unique() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();

    let first = backend.issue_token(&alice, "1 day").await.unwrap();
    let second = backend.issue_token(&alice, "1 day").await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();
    let token = backend.issue_token(&alice, "30ms").await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(backend.authenticate(&cookie(&token)).await.unwrap(), None);
    assert_eq!(backend.token_count(), 0);
}

#[tokio::test]
async fn test_abandoned_expired_tokens_are_purged() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();
    for _ in 0..50 {
        backend.issue_token(&alice, "200ms").await.unwrap();
    }
    let live = backend.issue_token(&alice, "1 day").await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(backend.purge_expired_tokens(), 50);
    assert_eq!(backend.token_count(), 1);
    assert!(backend.authenticate(&cookie(&live)).await.unwrap().is_some());
}

#[tokio::test]
async fn test_issuing_purges_expired_tokens() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();
    for _ in 0..10 {
        backend.issue_token(&alice, "200ms").await.unwrap();
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    backend.issue_token(&alice, "2 weeks").await.unwrap();

    assert_eq!(backend.token_count(), 1);
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let backend = backend();

    assert_eq!(backend.authenticate(&cookie("forged")).await.unwrap(), None);
}

#[tokio::test]
async fn test_removing_user_revokes_tokens() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();
    let token = backend.issue_token(&alice, "1 day").await.unwrap();

    assert!(backend.remove_user("alice").is_some());

    assert_eq!(backend.token_count(), 0);
    assert_eq!(backend.authenticate(&cookie(&token)).await.unwrap(), None);
}

#[tokio::test]
async fn test_issue_requires_numeric_model_id() {
    let backend = backend();
    let anonymous = Identity::from_value(json!({"User": {"name": "x"}})).unwrap();

    let err = backend.issue_token(&anonymous, "1 day").await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_issue_rejects_bad_duration() {
    let backend = backend();
    let alice = Identity::from_value(json!({"User": {"id": 5}})).unwrap();

    assert!(backend.issue_token(&alice, "eventually").await.is_err());
    assert_eq!(backend.token_count(), 0);
}

#[tokio::test]
async fn test_custom_credentials_are_not_implemented() {
    let backend = backend();

    let err = backend
        .authenticate(&Credentials::Custom {
            kind: "ldap".to_string(),
            payload: json!({}),
        })
        .await
        .unwrap_err();

    match err {
        Error::NotImplemented { backend, operation } => {
            assert_eq!(backend, "User");
            assert_eq!(operation, "authenticate(ldap)");
        }
        other => panic!("Expected NotImplemented, got {other:?}"),
    }
}

#[test]
fn test_add_user_rejects_empty_username() {
    let backend = backend();

    assert!(backend.add_user(9, "", "pw", Map::new()).is_err());
    assert_eq!(backend.user_count(), 1);
}
