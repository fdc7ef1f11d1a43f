//! src/routes/send_email.rs

use crate::domain::{
    ContactEmail, ContactMessage, ContactName, ContactSubject, ContactSubmission, ValidationError,
};
use crate::email_client::{MailTransport, Mailbox, OutboundEmail};
use crate::error::RelayResult;
use crate::startup::ContactMailboxes;
use actix_web::{web, HttpResponse};

/// Contact form submission as it travels over the wire.
///
/// Missing fields deserialize to empty strings, so they are reported as
/// validation errors instead of opaque parse failures.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        let name = ContactName::parse(value.name)?;
        let email = ContactEmail::parse(value.email)?;
        let subject = ContactSubject::parse(value.subject)?;
        let message = ContactMessage::parse(value.message)?;
        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }
}

/// Body of every response of the relay endpoint.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub ok: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RelayResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            detail: None,
        }
    }

    pub fn failure(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            detail,
        }
    }
}

/// Turn a validated submission into the email sent to the site owner.
/// The sender is always our own mailbox; the visitor goes into Reply-To.
pub fn build_outbound_email(
    submission: &ContactSubmission,
    mailboxes: &ContactMailboxes,
) -> OutboundEmail {
    OutboundEmail {
        sender: Mailbox::from(mailboxes.sender.clone()),
        recipient: Mailbox::from(mailboxes.recipient.clone()),
        reply_to: Some(Mailbox::new(
            Some(submission.name.as_ref().to_owned()),
            submission.email.clone(),
        )),
        subject: submission.email_subject(),
        text_body: submission.email_body(),
    }
}

#[tracing::instrument(
    name = "Relaying a contact submission.",
    skip(form, transport, mailboxes),
    fields(
        contact_name = %form.name,
        contact_email = %form.email
    )
)]
pub async fn send_email(
    form: web::Json<ContactFormData>,
    transport: web::Data<dyn MailTransport>,
    mailboxes: web::Data<ContactMailboxes>,
) -> RelayResult<HttpResponse> {
    let submission: ContactSubmission = form.into_inner().try_into()?;
    let email = build_outbound_email(&submission, &mailboxes);
    match transport.send(&email).await {
        Ok(receipt) => {
            tracing::info!(
                message_id = receipt.message_id.as_deref().unwrap_or("-"),
                "Contact email sent"
            );
            Ok(HttpResponse::Ok().json(RelayResponse::success("Email sent successfully!")))
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to send contact email"
            );
            Err(e.into())
        }
    }
}
