//! src/domain/contact_subject.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

const MAX_SUBJECT_GRAPHEMES: usize = 256;

/// Optional subject line a visitor may supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

impl ContactSubject {
    /// Blank input means "no subject" and yields `Ok(None)`.
    pub fn parse(s: Option<String>) -> Result<Option<ContactSubject>, ValidationError> {
        let Some(s) = s else {
            return Ok(None);
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.graphemes(true).count() > MAX_SUBJECT_GRAPHEMES
            || trimmed.contains(['\r', '\n'])
        {
            return Err(ValidationError::InvalidSubject(s));
        }
        Ok(Some(Self(trimmed.to_owned())))
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
