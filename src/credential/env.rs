// ABOUTME: EnvStore - resolves credentials from the process environment.
// ABOUTME: Every app id sees the same snapshot of environment variables.

use std::ffi::OsString;

use async_trait::async_trait;

use super::{Connection, CredentialStore};
use crate::error::CredentialError;

/// A credential store backed by environment variables.
///
/// Keys are looked up by their bare name, so `GMAIL_USER` is read from the
/// `GMAIL_USER` variable regardless of the requested app id.
#[derive(Debug, Clone, Default)]
pub struct EnvStore;

impl EnvStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialStore for EnvStore {
    async fn connection(&self, app_id: &str) -> Result<Connection, CredentialError> {
        tracing::debug!(app_id, "resolving credentials from environment");
        Ok(connection_from_vars(std::env::vars_os()))
    }
}

/// Build a connection from raw variables, skipping non-Unicode entries.
pub(crate) fn connection_from_vars(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> Connection {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                tracing::debug!(key = ?key.ok(), "skipping non-Unicode environment variable");
                None
            }
        })
        .collect()
}
