// ABOUTME: Declarative tool registration records handed to an agent host.
// ABOUTME: Name, description, permission level, and required credentials.

use serde::{Deserialize, Serialize};

/// Permission level a host must grant before invoking a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolPermission {
    /// No side effects beyond outbound reads.
    ReadOnly,
    /// Writes or sends on the user's behalf.
    Write,
    /// Elevated access; acts with the user's own account.
    Admin,
}

/// Shape of a credential connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    KeyValue,
}

/// A credential connection a tool expects the host to provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedCredential {
    pub app_id: String,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    /// Keys the connection must contain.
    pub keys: Vec<String>,
}

impl ExpectedCredential {
    pub fn key_value(app_id: impl Into<String>, keys: &[&str]) -> Self {
        Self {
            app_id: app_id.into(),
            kind: ConnectionType::KeyValue,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Everything a host needs to list and gate a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub permission: ToolPermission,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_credentials: Vec<ExpectedCredential>,
    pub input_schema: serde_json::Value,
}
