//! src/domain/contact_name.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

const MAX_NAME_GRAPHEMES: usize = 256;

/// Display name a visitor enters in the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(s: String) -> Result<ContactName, ValidationError> {
        let trimmed = s.trim();
        let is_empty = trimmed.is_empty();
        let is_too_long = trimmed.graphemes(true).count() > MAX_NAME_GRAPHEMES;
        let contains_control_characters = trimmed.chars().any(char::is_control);

        if is_empty || is_too_long || contains_control_characters {
            Err(ValidationError::InvalidName(s))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
