//! src/contact_form.rs
//!
//! Client side of the contact form. Holds what the visitor typed, talks to
//! the relay and turns the outcome into a status line shown next to the form.
//!
//! A submission moves `Idle -> Submitting -> Idle` and ends with either a
//! success or an error status. There is no retry and no client side timeout.

use crate::domain::ContactEmail;
use crate::routes::{ContactFormData, RelayResponse};
use std::ops::{Deref, DerefMut};

pub const SUCCESS_STATUS: &str = "Message sent successfully!";
pub const INVALID_EMAIL_STATUS: &str = "Error: please enter a valid email address.";
pub const SERVER_ERROR_STATUS: &str = "Error: failed to send message. Please try again later.";
pub const UNREACHABLE_STATUS: &str = "Error: server unreachable. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn text(&self) -> &str {
        match self {
            FormStatus::Success(text) | FormStatus::Error(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormStatus::Success(_))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RelayClientError {
    #[error("Relay server is unreachable")]
    Unreachable(#[source] reqwest::Error),
    #[error("Relay server responded with status {status}")]
    Rejected {
        status: u16,
        body: Option<RelayResponse>,
    },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

/// Thin HTTP client for `POST /send-email`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: format!("{}/send-email", base_url.trim_end_matches('/')),
        }
    }

    #[tracing::instrument(name = "Post contact submission to relay", skip_all)]
    pub async fn send_submission(
        &self,
        form: &ContactFormData,
    ) -> Result<RelayResponse, RelayClientError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
            .map_err(RelayClientError::Unreachable)?;
        let status = response.status();
        let body = response.json::<RelayResponse>().await.ok();
        if status.is_success() {
            Ok(body.unwrap_or_else(|| RelayResponse::success(SUCCESS_STATUS)))
        } else {
            Err(RelayClientError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Local state of the contact form.
#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
    is_submitting: bool,
    status: Option<FormStatus>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store what the visitor typed. No validation happens here.
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Subject => self.subject = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    fn to_form_data(&self) -> ContactFormData {
        let subject = Some(self.subject.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            subject,
            message: self.message.clone(),
        }
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
    }

    /// Submit the form once. Fields are only cleared on success.
    pub async fn submit(&mut self, client: &RelayClient) -> Result<&FormStatus, SubmitError> {
        let mut form = SubmittingGuard::acquire(self)?;
        let status = form.attempt(client).await;
        drop(form);
        Ok(self.status.insert(status))
    }

    async fn attempt(&mut self, client: &RelayClient) -> FormStatus {
        if ContactEmail::parse(self.email.clone()).is_err() {
            return FormStatus::Error(INVALID_EMAIL_STATUS.to_string());
        }
        match client.send_submission(&self.to_form_data()).await {
            Ok(_) => {
                self.clear_fields();
                FormStatus::Success(SUCCESS_STATUS.to_string())
            }
            Err(e @ RelayClientError::Rejected { .. }) => {
                tracing::warn!(error.message = %e, "Relay rejected the submission");
                FormStatus::Error(SERVER_ERROR_STATUS.to_string())
            }
            Err(e @ RelayClientError::Unreachable(_)) => {
                tracing::warn!(error.message = %e, "Relay is unreachable");
                FormStatus::Error(UNREACHABLE_STATUS.to_string())
            }
        }
    }
}

/// Holds the busy flag for the duration of one submission. The flag is
/// cleared on drop, so it is released on every exit path, including a
/// dropped (cancelled) submit future.
struct SubmittingGuard<'a> {
    form: &'a mut ContactForm,
}

impl<'a> SubmittingGuard<'a> {
    fn acquire(form: &'a mut ContactForm) -> Result<Self, SubmitError> {
        if form.is_submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        form.is_submitting = true;
        form.status = None;
        Ok(Self { form })
    }
}

impl Deref for SubmittingGuard<'_> {
    type Target = ContactForm;

    fn deref(&self) -> &Self::Target {
        self.form
    }
}

impl DerefMut for SubmittingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.form
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.form.is_submitting = false;
    }
}
