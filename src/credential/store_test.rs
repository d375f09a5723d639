// ABOUTME: Tests for credential stores - lookup, missing keys, TOML files.
// ABOUTME: FileStore tests write throwaway secrets files with tempfile.

use std::sync::Arc;

use super::*;
use crate::error::CredentialError;

fn gmail_store() -> MemoryStore {
    MemoryStore::new().with_connection(
        GMAIL_APP_ID,
        Connection::new()
            .with(GMAIL_USER, "sender@example.com")
            .with(GMAIL_APP_PASSWORD, "app-password"),
    )
}

#[test]
fn test_require_present() {
    let conn = Connection::new().with("KEY", "value");
    assert_eq!(conn.require("KEY").unwrap(), "value");
    assert_eq!(conn.len(), 1);
}

#[test]
fn test_require_missing() {
    let conn = Connection::new();
    let err = conn.require("GOOGLE_API_KEY").unwrap_err();
    assert_eq!(err.missing_key(), Some("GOOGLE_API_KEY"));
    assert_eq!(err.to_string(), "missing credential 'GOOGLE_API_KEY'");
}

#[test]
fn test_debug_hides_values() {
    let conn = Connection::new().with("GMAIL_APP_PASSWORD", "hunter2");
    let debug = format!("{:?}", conn);
    assert!(debug.contains("GMAIL_APP_PASSWORD"));
    assert!(!debug.contains("hunter2"));

    let creds = GmailCredentials {
        user: "me@example.com".into(),
        app_password: "hunter2".into(),
    };
    assert!(!format!("{:?}", creds).contains("hunter2"));
}

#[tokio::test]
async fn test_memory_store_unknown_connection() {
    let store = MemoryStore::new();
    let err = store.connection("gmail_credentials").await.unwrap_err();
    assert!(matches!(err, CredentialError::UnknownConnection(ref id) if id == "gmail_credentials"));
}

#[tokio::test]
async fn test_gmail_credentials_resolve() {
    let store = gmail_store();
    let creds = GmailCredentials::resolve(&store).await.unwrap();
    assert_eq!(creds.user, "sender@example.com");
    assert_eq!(creds.app_password, "app-password");
}

#[tokio::test]
async fn test_gmail_credentials_missing_password() {
    let store = MemoryStore::new().with_connection(
        GMAIL_APP_ID,
        Connection::new().with(GMAIL_USER, "sender@example.com"),
    );
    let err = GmailCredentials::resolve(&store).await.unwrap_err();
    assert_eq!(err.missing_key(), Some(GMAIL_APP_PASSWORD));
}

#[tokio::test]
async fn test_search_source_static() {
    let source = SearchCredentialSource::Static(SearchCredentials::new("key", "cx"));
    assert!(!source.is_secret_store());
    let creds = source.resolve().await.unwrap();
    assert_eq!(creds.api_key, "key");
    assert_eq!(creds.engine_id, "cx");
}

#[tokio::test]
async fn test_search_source_secret_store_missing_engine_id() {
    let store = MemoryStore::new().with_connection(
        GOOGLE_SEARCH_APP_ID,
        Connection::new().with(GOOGLE_API_KEY, "key"),
    );
    let source = SearchCredentialSource::SecretStore(Arc::new(store));
    assert!(source.is_secret_store());
    let err = source.resolve().await.unwrap_err();
    assert_eq!(err.missing_key(), Some(GOOGLE_SEARCH_ENGINE_ID));
}

#[cfg(unix)]
#[test]
fn test_env_vars_skip_non_unicode() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let vars = vec![
        (OsString::from("GMAIL_USER"), OsString::from("sender@example.com")),
        (OsString::from("BAD"), OsString::from_vec(vec![0xff, 0xfe])),
        (OsString::from_vec(vec![0xff]), OsString::from("value")),
    ];
    let conn = env::connection_from_vars(vars);
    assert_eq!(conn.len(), 1);
    assert_eq!(conn.get(GMAIL_USER), Some("sender@example.com"));
    assert!(conn.get("BAD").is_none());
}

#[tokio::test]
async fn test_env_store_resolves_without_panicking() {
    let conn = EnvStore::new().connection(GMAIL_APP_ID).await.unwrap();
    assert!(conn.get("ERRAND_SURELY_UNSET_VARIABLE").is_none());
}

#[test]
fn test_parse_connection_ignores_non_strings() {
    let doc = r#"
[google_search_api]
GOOGLE_API_KEY = "key"
GOOGLE_SEARCH_ENGINE_ID = "cx"
retries = 3
"#;
    let conn = file::parse_connection(doc, GOOGLE_SEARCH_APP_ID).unwrap();
    assert_eq!(conn.len(), 2);
    assert_eq!(conn.get(GOOGLE_API_KEY), Some("key"));
    assert!(conn.get("retries").is_none());
}

#[test]
fn test_parse_connection_invalid_toml() {
    let err = file::parse_connection("not = [valid", GMAIL_APP_ID).unwrap_err();
    assert!(matches!(err, CredentialError::Store(_)));
}

#[tokio::test]
async fn test_file_store_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secrets.toml");
    std::fs::write(
        &path,
        r#"
[gmail_credentials]
GMAIL_USER = "sender@example.com"
GMAIL_APP_PASSWORD = "app-password"
"#,
    )
    .unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();
    }

    let store = FileStore::new(&path);
    let creds = GmailCredentials::resolve(&store).await.unwrap();
    assert_eq!(creds.user, "sender@example.com");

    let err = store.connection(GOOGLE_SEARCH_APP_ID).await.unwrap_err();
    assert!(matches!(err, CredentialError::UnknownConnection(_)));
}

#[tokio::test]
async fn test_file_store_missing_file() {
    let store = FileStore::new("/nonexistent/secrets.toml");
    let err = store.connection(GMAIL_APP_ID).await.unwrap_err();
    assert!(matches!(err, CredentialError::Store(_)));
}
