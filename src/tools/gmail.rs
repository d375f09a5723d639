// ABOUTME: SendGmailTool - sends a plain-text email through Gmail SMTP.
// ABOUTME: Credentials come from the gmail_credentials connection.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use crate::credential::{
    CredentialStore, GMAIL_APP_ID, GMAIL_APP_PASSWORD, GMAIL_USER, GmailCredentials,
};
use crate::error::{MailError, ToolError};
use crate::tool::{ExpectedCredential, Tool, ToolPermission, ToolResult};

pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";
pub const GMAIL_SMTP_PORT: u16 = 587;

pub const SEND_SUCCESS: &str = "✅ Email sent successfully!";
pub const SEND_FAILURE_PREFIX: &str = "❌ Failed to send email: ";

/// Submits a built message using the sender's credentials.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn submit(
        &self,
        credentials: &GmailCredentials,
        message: Message,
    ) -> Result<(), MailError>;
}

/// SMTP submission host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            host: GMAIL_SMTP_HOST.to_string(),
            port: GMAIL_SMTP_PORT,
        }
    }
}

/// STARTTLS submission via lettre. Waits without a timeout.
#[derive(Debug, Clone, Default)]
pub struct SmtpMailTransport {
    config: MailerConfig,
}

impl SmtpMailTransport {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn submit(
        &self,
        credentials: &GmailCredentials,
        message: Message,
    ) -> Result<(), MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                credentials.user.clone(),
                credentials.app_password.clone(),
            ))
            .timeout(None)
            .build();

        let response = transport.send(message).await?;
        tracing::debug!(
            host = %self.config.host,
            code = %response.code(),
            "SMTP server accepted message"
        );
        Ok(())
    }
}

/// Build the single-recipient plain-text message.
pub fn build_message(
    sender: &str,
    recipient: &str,
    subject: &str,
    body: &str,
) -> Result<Message, MailError> {
    let from: Mailbox = sender.parse()?;
    let to: Mailbox = recipient.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?)
}

/// Tool for sending email from the configured Gmail account.
pub struct SendGmailTool {
    store: Arc<dyn CredentialStore>,
    transport: Arc<dyn MailTransport>,
}

impl SendGmailTool {
    /// Create a tool that submits to Gmail over STARTTLS.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self::with_transport(store, Arc::new(SmtpMailTransport::default()))
    }

    /// Create with a custom transport.
    pub fn with_transport(
        store: Arc<dyn CredentialStore>,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self { store, transport }
    }

    /// Send an email, returning the typed failure.
    ///
    /// Credentials are resolved before any connection is opened.
    pub async fn try_send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let credentials = GmailCredentials::resolve(self.store.as_ref()).await?;
        let message = build_message(&credentials.user, recipient, subject, body)?;

        tracing::debug!(from = %credentials.user, to = recipient, subject, "submitting email");
        self.transport.submit(&credentials, message).await
    }

    /// Send an email; the outcome is always a human-readable string.
    pub async fn send(&self, recipient: &str, subject: &str, body: &str) -> String {
        match self.deliver(recipient, subject, body).await {
            Ok(()) => SEND_SUCCESS.to_string(),
            Err(message) => message,
        }
    }

    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> Result<(), String> {
        match self.try_send(recipient, subject, body).await {
            Ok(()) => {
                tracing::info!(to = recipient, "email sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(to = recipient, error = %e, "email failed");
                Err(format!("{}{}", SEND_FAILURE_PREFIX, e))
            }
        }
    }
}

#[async_trait]
impl Tool for SendGmailTool {
    fn name(&self) -> &str {
        "send_gmail"
    }

    fn description(&self) -> &str {
        "Send a plain-text email from the configured Gmail account."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "recipient_email": {
                    "type": "string",
                    "description": "The recipient's email address"
                },
                "subject": {
                    "type": "string",
                    "description": "Email subject line"
                },
                "body": {
                    "type": "string",
                    "description": "Email body content"
                }
            },
            "required": ["recipient_email", "subject", "body"]
        })
    }

    fn permission(&self) -> ToolPermission {
        ToolPermission::Admin
    }

    fn expected_credentials(&self) -> Vec<ExpectedCredential> {
        vec![ExpectedCredential::key_value(
            GMAIL_APP_ID,
            &[GMAIL_USER, GMAIL_APP_PASSWORD],
        )]
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            recipient_email: String,
            subject: String,
            body: String,
        }
        let params: Params = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        match self
            .deliver(&params.recipient_email, &params.subject, &params.body)
            .await
        {
            Ok(()) => Ok(ToolResult::text(SEND_SUCCESS)),
            Err(message) => Ok(ToolResult::error(message)),
        }
    }
}
