//! src/domain/contact_submission.rs

use crate::domain::{ContactEmail, ContactMessage, ContactName, ContactSubject};

/// A validated contact form submission. Lives for one request only.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: Option<ContactSubject>,
    pub message: ContactMessage,
}

impl ContactSubmission {
    /// Subject line of the relayed email: the visitor's own subject if given,
    /// otherwise a fixed template with the visitor's name.
    pub fn email_subject(&self) -> String {
        match &self.subject {
            Some(subject) => subject.as_ref().to_owned(),
            None => format!("Portfolio Message from {}", self.name),
        }
    }

    /// Plain text body of the relayed email.
    pub fn email_body(&self) -> String {
        let mut body = format!("Sender: {} ({})\n\n", self.name, self.email);
        if let Some(subject) = &self.subject {
            body.push_str(&format!("Subject: {}\n\n", subject.as_ref()));
        }
        body.push_str(&format!("Message: {}", self.message.as_ref()));
        body
    }
}
