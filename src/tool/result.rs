// ABOUTME: Defines the ToolResult type - what a tool hands back to the host,
// ABOUTME: either a plain string or a JSON value, plus an error flag.

use serde::Serialize;

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The output, a JSON string for text results.
    pub content: serde_json::Value,

    /// Whether this result represents a failure.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: serde_json::Value::String(content.into()),
            is_error: false,
        }
    }

    /// Create a failed text result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: serde_json::Value::String(message.into()),
            is_error: true,
        }
    }

    /// Create a structured result from any serializable value.
    pub fn json(value: &impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content: serde_json::to_value(value)?,
            is_error: false,
        })
    }

    /// Mark this result as a failure.
    pub fn failed(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// The content as a string slice, if it is a text result.
    pub fn as_text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::text("")
    }
}
