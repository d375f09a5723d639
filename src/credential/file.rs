// ABOUTME: FileStore - resolves credentials from a TOML secrets file.
// ABOUTME: Each app id is a table; the file is re-read on every lookup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{Connection, CredentialStore};
use crate::error::CredentialError;

/// A credential store backed by a TOML file.
///
/// ```toml
/// [gmail_credentials]
/// GMAIL_USER = "me@example.com"
/// GMAIL_APP_PASSWORD = "abcd efgh ijkl mnop"
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(unix)]
    fn check_permissions(&self, metadata: &std::fs::Metadata) {
        use std::os::unix::fs::PermissionsExt;
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            tracing::warn!(
                path = %self.path.display(),
                "secrets file has insecure permissions: {:o} (expected 600)",
                mode
            );
        }
    }

    #[cfg(not(unix))]
    fn check_permissions(&self, _metadata: &std::fs::Metadata) {}
}

/// Parse a secrets document and extract the table for `app_id`.
pub(crate) fn parse_connection(
    contents: &str,
    app_id: &str,
) -> Result<Connection, CredentialError> {
    let table = contents
        .parse::<toml::Table>()
        .map_err(|e| CredentialError::Store(e.message().to_string()))?;

    let section = table
        .get(app_id)
        .and_then(|v| v.as_table())
        .ok_or_else(|| CredentialError::UnknownConnection(app_id.to_string()))?;

    Ok(section
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
        .collect())
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn connection(&self, app_id: &str) -> Result<Connection, CredentialError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| CredentialError::Store(format!("{}: {}", self.path.display(), e)))?;
        self.check_permissions(&metadata);

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CredentialError::Store(format!("{}: {}", self.path.display(), e)))?;

        let connection = parse_connection(&contents, app_id)?;
        tracing::debug!(
            app_id,
            keys = connection.len(),
            path = %self.path.display(),
            "loaded connection from secrets file"
        );
        Ok(connection)
    }
}
