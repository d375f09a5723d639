// ABOUTME: Defines all error types for the errand library using thiserror.
// ABOUTME: Each concern (credentials, mail, search, tools) has its own enum.

/// Errors from resolving credentials out of a secret store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The connection exists but lacks a required key.
    #[error("missing credential '{key}'")]
    Missing { key: String },

    /// No connection is registered under the given app id.
    #[error("no connection configured for '{0}'")]
    UnknownConnection(String),

    /// The backing store could not be read.
    #[error("secret store unavailable: {0}")]
    Store(String),
}

impl CredentialError {
    /// Returns the missing key, if this is a missing-credential error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            CredentialError::Missing { key } => Some(key),
            _ => None,
        }
    }
}

/// Errors from composing or submitting an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors from talking to the search endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}
