// ABOUTME: Defines the CredentialStore trait and the Connection key-value map.
// ABOUTME: Includes MemoryStore, an in-process store for hosts and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::CredentialError;

/// The named secret values registered under one app id.
#[derive(Clone, Default)]
pub struct Connection {
    values: HashMap<String, String>,
}

impl Connection {
    /// Create an empty connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key-value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a value, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value, failing with `CredentialError::Missing` when absent.
    pub fn require(&self, key: &str) -> Result<&str, CredentialError> {
        self.get(key).ok_or_else(|| CredentialError::Missing {
            key: key.to_string(),
        })
    }

    /// Number of keys in this connection.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this connection holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Connection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Secret values never appear in debug output.
impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("Connection").field("keys", &keys).finish()
    }
}

/// A key-value secret store addressed by app id.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Resolve the connection registered under `app_id`.
    async fn connection(&self, app_id: &str) -> Result<Connection, CredentialError>;
}

/// An in-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    connections: HashMap<String, Connection>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection under an app id.
    pub fn with_connection(mut self, app_id: impl Into<String>, connection: Connection) -> Self {
        self.connections.insert(app_id.into(), connection);
        self
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn connection(&self, app_id: &str) -> Result<Connection, CredentialError> {
        self.connections
            .get(app_id)
            .cloned()
            .ok_or_else(|| CredentialError::UnknownConnection(app_id.to_string()))
    }
}
