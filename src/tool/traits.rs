// ABOUTME: Defines the Tool trait - the callable surface exposed to a host.
// ABOUTME: Tools have a name, description, schema, permission, and execute.

use async_trait::async_trait;

use super::{ExpectedCredential, ToolPermission, ToolResult, ToolSpec};

/// A tool that can be invoked by an agent host.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the host.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Permission level required to invoke this tool.
    fn permission(&self) -> ToolPermission {
        ToolPermission::ReadOnly
    }

    /// Credential connections the host must configure.
    fn expected_credentials(&self) -> Vec<ExpectedCredential> {
        Vec::new()
    }

    /// Build the registration record for this tool.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            permission: self.permission(),
            expected_credentials: self.expected_credentials(),
            input_schema: self.schema(),
        }
    }

    /// Execute the tool with the given parameters.
    ///
    /// Failures of the underlying operation are reported inside the
    /// `ToolResult`; `Err` is reserved for malformed parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}
