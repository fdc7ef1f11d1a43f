//! src/domain/contact_email.rs

use crate::domain::ValidationError;
use validator::ValidateEmail;

/// Email address of a visitor or of a configured mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Accepts `local@domain` where the domain contains at least one dot.
    /// Deliverability is not checked.
    pub fn parse(s: String) -> Result<ContactEmail, ValidationError> {
        let s = s.trim().to_owned();
        let has_dotted_domain = s
            .rsplit_once('@')
            .map(|(_, domain)| {
                domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            })
            .unwrap_or(false);
        if s.validate_email() && has_dotted_domain {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail(s))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
