//! src/domain/mod.rs

mod contact_email;
mod contact_message;
mod contact_name;
mod contact_subject;
mod contact_submission;

pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use contact_subject::ContactSubject;
pub use contact_submission::ContactSubmission;

/// Validation error for domain data
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` is not a valid email address.")]
    InvalidEmail(String),
    #[error("`{0}` is not a valid name.")]
    InvalidName(String),
    #[error("`{0}` is not a valid subject.")]
    InvalidSubject(String),
    #[error("The message must not be empty and not longer than {max} characters.")]
    InvalidMessage { max: usize },
}
