//! src/email_client/mod.rs
//!
//! Outbound mail capability used by the relay. The relay only sees the
//! [`MailTransport`] trait; which provider sits behind it is decided once at
//! startup from the `emailclient` configuration section.

mod api;
mod smtp;

pub use api::EmailClient;
pub use smtp::SmtpMailer;

use crate::domain::ContactEmail;
use crate::error::error_chain_fmt;

/// Sender or recipient of an email, with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: ContactEmail,
}

impl Mailbox {
    pub fn new(name: Option<String>, email: ContactEmail) -> Self {
        Self { name, email }
    }
}

impl From<ContactEmail> for Mailbox {
    fn from(email: ContactEmail) -> Self {
        Self { name: None, email }
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => {
                let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{}\" <{}>", quoted, self.email)
            }
            None => write!(f, "{}", self.email),
        }
    }
}

/// One plain text email, ready to be handed to a transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub text_body: String,
}

/// Returned by a transport once the provider accepted the email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider assigned id, if the provider returns one.
    pub message_id: Option<String>,
}

#[derive(thiserror::Error)]
pub enum TransportError {
    #[error("Failed to reach the email API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Email API rejected the email with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("Invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
}

impl std::fmt::Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Capability to send one email. Implementations are shared read-only
/// between all request handlers for the whole serving lifetime.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, TransportError>;
}
