//! src/domain/contact_message.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

const MAX_MESSAGE_GRAPHEMES: usize = 10_000;

/// Free text body of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<ContactMessage, ValidationError> {
        if s.trim().is_empty() || s.graphemes(true).count() > MAX_MESSAGE_GRAPHEMES {
            Err(ValidationError::InvalidMessage {
                max: MAX_MESSAGE_GRAPHEMES,
            })
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
