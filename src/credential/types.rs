// ABOUTME: Typed credential structs resolved from a CredentialStore.
// ABOUTME: Also defines SearchCredentialSource, the store-vs-static strategy.

use std::sync::Arc;

use super::CredentialStore;
use crate::error::CredentialError;

/// App id of the Gmail connection.
pub const GMAIL_APP_ID: &str = "gmail_credentials";
pub const GMAIL_USER: &str = "GMAIL_USER";
pub const GMAIL_APP_PASSWORD: &str = "GMAIL_APP_PASSWORD";

/// App id of the Google Custom Search connection.
pub const GOOGLE_SEARCH_APP_ID: &str = "google_search_api";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const GOOGLE_SEARCH_ENGINE_ID: &str = "GOOGLE_SEARCH_ENGINE_ID";

/// Sender address and application password for SMTP submission.
#[derive(Clone, PartialEq, Eq)]
pub struct GmailCredentials {
    pub user: String,
    pub app_password: String,
}

impl GmailCredentials {
    /// Resolve from the `gmail_credentials` connection.
    pub async fn resolve(store: &dyn CredentialStore) -> Result<Self, CredentialError> {
        let conn = store.connection(GMAIL_APP_ID).await?;
        Ok(Self {
            user: conn.require(GMAIL_USER)?.to_string(),
            app_password: conn.require(GMAIL_APP_PASSWORD)?.to_string(),
        })
    }
}

impl std::fmt::Debug for GmailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailCredentials")
            .field("user", &self.user)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

/// API key and search engine id for the Custom Search API.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

impl SearchCredentials {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    /// Resolve from the `google_search_api` connection.
    pub async fn resolve(store: &dyn CredentialStore) -> Result<Self, CredentialError> {
        let conn = store.connection(GOOGLE_SEARCH_APP_ID).await?;
        Ok(Self {
            api_key: conn.require(GOOGLE_API_KEY)?.to_string(),
            engine_id: conn.require(GOOGLE_SEARCH_ENGINE_ID)?.to_string(),
        })
    }
}

impl std::fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("api_key", &"<redacted>")
            .field("engine_id", &self.engine_id)
            .finish()
    }
}

/// Where the search tool gets its credentials from.
///
/// The variant also decides error classification: only the secret-store
/// variant reports HTTP 403 as an API key problem and surfaces missing
/// keys as configuration errors.
#[derive(Clone)]
pub enum SearchCredentialSource {
    /// Look up `google_search_api` in a secret store on every call.
    SecretStore(Arc<dyn CredentialStore>),

    /// Use fixed constants.
    Static(SearchCredentials),
}

impl SearchCredentialSource {
    /// Resolve the credentials for one call.
    pub async fn resolve(&self) -> Result<SearchCredentials, CredentialError> {
        match self {
            SearchCredentialSource::SecretStore(store) => {
                SearchCredentials::resolve(store.as_ref()).await
            }
            SearchCredentialSource::Static(creds) => Ok(creds.clone()),
        }
    }

    /// Whether this source comes from a secret store.
    pub fn is_secret_store(&self) -> bool {
        matches!(self, SearchCredentialSource::SecretStore(_))
    }
}

impl std::fmt::Debug for SearchCredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCredentialSource::SecretStore(_) => f.write_str("SecretStore"),
            SearchCredentialSource::Static(creds) => f.debug_tuple("Static").field(creds).finish(),
        }
    }
}
