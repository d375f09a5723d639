// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use errand::prelude::*;` to get started quickly.

pub use crate::credential::{
    Connection, CredentialStore, EnvStore, FileStore, GmailCredentials, MemoryStore,
    SearchCredentialSource, SearchCredentials,
};
pub use crate::error::{CredentialError, MailError, SearchError, ToolError};
pub use crate::tool::{
    ConnectionType, ExpectedCredential, Registry, Tool, ToolPermission, ToolResult, ToolSpec,
};
pub use crate::tools::{
    GoogleSearchTool, MailTransport, MailerConfig, SearchConfig, SearchFailure, SearchRecord,
    SendGmailTool, SmtpMailTransport,
};
