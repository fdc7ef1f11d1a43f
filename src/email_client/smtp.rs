//! src/email_client/smtp.rs

use crate::email_client::{DeliveryReceipt, MailTransport, Mailbox, OutboundEmail, TransportError};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Sends emails through an SMTP relay, e.g. a Gmail account.
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Without a username the connection is plain and unauthenticated, which
    /// is what local catchers like MailDev expect. Otherwise STARTTLS is
    /// required and the credentials are sent.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &Secret<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mailer = if username.trim().is_empty() {
            tracing::info!(
                smtp_host = %host,
                smtp_port = port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(port)
                .timeout(Some(timeout))
                .build()
        } else {
            tracing::info!(
                smtp_host = %host,
                smtp_port = port,
                "SMTP mailer initialized with authentication and STARTTLS"
            );
            let credentials =
                Credentials::new(username.to_owned(), password.expose_secret().to_owned());
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
                .port(port)
                .credentials(credentials)
                .timeout(Some(timeout))
                .build()
        };
        Ok(Self { mailer })
    }
}

fn lettre_mailbox(mailbox: &Mailbox) -> Result<lettre::message::Mailbox, TransportError> {
    let address = mailbox.email.as_ref().parse()?;
    Ok(lettre::message::Mailbox::new(mailbox.name.clone(), address))
}

fn build_message(email: &OutboundEmail) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(lettre_mailbox(&email.sender)?)
        .to(lettre_mailbox(&email.recipient)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN);
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(lettre_mailbox(reply_to)?);
    }
    Ok(builder.body(email.text_body.clone())?)
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    #[tracing::instrument(
        name = "Send email via SMTP",
        skip_all,
        fields(recipient = %email.recipient.email)
    )]
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, TransportError> {
        let message = build_message(email)?;
        let response = self.mailer.send(message).await?;
        Ok(delivery_receipt(&response))
    }
}

/// SMTP replies carry no message id, only a status line. The line is logged
/// for diagnostics but never reported as an id.
fn delivery_receipt(response: &Response) -> DeliveryReceipt {
    tracing::info!(
        smtp_reply = response.first_line().unwrap_or("-"),
        "SMTP relay accepted the email"
    );
    DeliveryReceipt { message_id: None }
}
