//! Configuration loading and validation tests

use authsome_domain::Error;
use authsome_infrastructure::config::{AppConfig, ConfigLoader, validate_app_config};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn assert_config_error(result: authsome_domain::Result<AppConfig>, needle: &str) {
    match result {
        Err(Error::Configuration { message, .. }) => {
            assert!(message.contains(needle), "'{message}' should mention '{needle}'");
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();

    validate_app_config(&config).unwrap();
    assert_eq!(config.auth.model, "User");
    assert_eq!(config.auth.default_persist_duration, "2 weeks");
    assert!(config.auth.clear_cookie_on_logout);
    assert_eq!(config.security.default_hash_method, "sha1");
    assert!(config.guest.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix("AUTHSOME_TEST_MISSING");

    let config = loader.load().unwrap();

    assert_eq!(config.auth.model, "User");
    assert_eq!(loader.config_path(), Some(dir.path().join("absent.toml").as_path()));
}

#[test]
fn test_toml_overrides_defaults() {
    let file = write_config(
        r#"
[auth]
model = "Member"
cookie_key = "remember_me"
default_persist_duration = "30 days"
clear_cookie_on_logout = false

[security]
salt = "pepper"
salt_passwords = true
default_hash_method = "sha256"

[guest]
enabled = false

[logging]
level = "debug"
json_format = true
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_TOML")
        .load()
        .unwrap();

    assert_eq!(config.auth.model, "Member");
    assert_eq!(config.auth.cookie_key(), "remember_me");
    assert_eq!(config.auth.session_key(), "Member");
    assert_eq!(config.auth.default_persist_duration, "30 days");
    assert!(!config.auth.clear_cookie_on_logout);
    assert_eq!(config.security.default_hash_method, "sha256");
    assert!(config.security.salt_passwords);
    assert!(!config.guest.enabled);
    assert!(config.logging.json_format);
}

#[test]
fn test_guest_fields_from_toml() {
    let file = write_config(
        r#"
[guest.fields]
id = 0
name = "Anonymous"
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_GUEST")
        .load()
        .unwrap();
    let guest = config.guest.identity("User").unwrap();

    assert_eq!(guest.extract("User.name"), Some(&serde_json::json!("Anonymous")));
}

#[test]
fn test_empty_model_is_rejected() {
    let file = write_config("[auth]\nmodel = \"\"\n");

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_MODEL")
        .load();

    assert_config_error(result, "auth.model");
}

#[test]
fn test_unparseable_duration_is_rejected() {
    let file = write_config("[auth]\ndefault_persist_duration = \"a fortnight\"\n");

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_DURATION")
        .load();

    assert_config_error(result, "default_persist_duration");
}

#[test]
fn test_unknown_hash_method_is_rejected() {
    let mut config = AppConfig::default();
    config.security.default_hash_method = "md5".to_string();

    let err = validate_app_config(&config).unwrap_err();

    assert!(err.to_string().contains("md5"));
}

#[test]
fn test_salting_requires_a_salt() {
    let mut config = AppConfig::default();
    config.security.salt_passwords = true;

    let err = validate_app_config(&config).unwrap_err();

    assert!(err.to_string().contains("security.salt"));
}

#[test]
fn test_cookie_secret_must_be_32_hex_bytes() {
    let mut config = AppConfig::default();

    config.security.cookie_secret = Some("00ff".to_string());
    assert!(validate_app_config(&config).is_err());

    config.security.cookie_secret = Some("zz".repeat(32));
    assert!(validate_app_config(&config).is_err());

    config.security.cookie_secret = Some("0f".repeat(32));
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();

    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let file = write_config("[auth\nmodel = ");

    let result = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_MALFORMED")
        .load();

    assert_config_error(result, "Failed to extract configuration");
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("authsome.toml");
    let mut config = AppConfig::default();
    config.auth.model = "Account".to_string();
    config.auth.session_key = Some("Auth.Account".to_string());
    config.security.cookie_secret = Some("ab".repeat(32));

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("AUTHSOME_TEST_SAVE");
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = loader.reload().unwrap();

    assert_eq!(reloaded.auth, config.auth);
    assert_eq!(reloaded.security, config.security);
}

#[test]
#[ignore = "mutates process environment; run with --test-threads=1"]
fn test_env_overrides_file() {
    let file = write_config("[auth]\nmodel = \"Member\"\n");
    // SAFETY: ignored by default; only run single-threaded.
    unsafe {
        std::env::set_var("AUTHSOME_TEST_ENV__AUTH__MODEL", "Admin");
        std::env::set_var("AUTHSOME_TEST_ENV__AUTH__DEFAULT_PERSIST_DURATION", "1 day");
    }

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("AUTHSOME_TEST_ENV")
        .load();

    unsafe {
        std::env::remove_var("AUTHSOME_TEST_ENV__AUTH__MODEL");
        std::env::remove_var("AUTHSOME_TEST_ENV__AUTH__DEFAULT_PERSIST_DURATION");
    }
    let config = config.unwrap();
    assert_eq!(config.auth.model, "Admin");
    assert_eq!(config.auth.default_persist_duration, "1 day");
}
