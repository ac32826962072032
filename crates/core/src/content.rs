//! The content store — the subject's source documents.
//!
//! Two immutable strings for the process lifetime: the long-form background
//! document (resume/CV text) and a short personal-info blurb. Loaders live
//! in the content crate; this type only enforces that the pipeline is never
//! constructed over unusable content.

use crate::error::ContentError;

/// Minimum plausible length for a background document.
pub const MIN_BACKGROUND_LEN: usize = 100;

/// Minimum plausible length for the personal-info blurb.
pub const MIN_PERSONAL_INFO_LEN: usize = 10;

/// The subject's source documents, validated at construction and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct ContentStore {
    background: String,
    personal_info: String,
}

impl ContentStore {
    /// Build a store from raw document text.
    ///
    /// Both inputs are trimmed. Fails if either is empty or implausibly
    /// short — a pipeline over such content would answer from nothing.
    pub fn new(
        background: impl Into<String>,
        personal_info: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let background = background.into().trim().to_string();
        let personal_info = personal_info.into().trim().to_string();

        validate_len(&background, "background document", MIN_BACKGROUND_LEN)?;
        validate_len(&personal_info, "personal info", MIN_PERSONAL_INFO_LEN)?;

        Ok(Self {
            background,
            personal_info,
        })
    }

    /// The full background document text.
    pub fn background(&self) -> &str {
        &self.background
    }

    /// The personal-info blurb.
    pub fn personal_info(&self) -> &str {
        &self.personal_info
    }
}

fn validate_len(value: &str, what: &str, min: usize) -> Result<(), ContentError> {
    if value.is_empty() {
        return Err(ContentError::Empty { what: what.into() });
    }
    if value.len() < min {
        return Err(ContentError::TooShort {
            what: what.into(),
            len: value.len(),
            min,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plausible_background() -> String {
        "Senior engineering leader with two decades of experience across \
         infrastructure, platform teams, and global IT organizations."
            .to_string()
    }

    #[test]
    fn accepts_plausible_content() {
        let store = ContentStore::new(plausible_background(), "Based in Singapore.").unwrap();
        assert!(store.background().contains("decades"));
        assert_eq!(store.personal_info(), "Based in Singapore.");
    }

    #[test]
    fn rejects_empty_background() {
        let err = ContentStore::new("   ", "Based in Singapore.").unwrap_err();
        assert!(matches!(err, ContentError::Empty { .. }));
    }

    #[test]
    fn rejects_too_short_background() {
        let err = ContentStore::new("CV: n/a", "Based in Singapore.").unwrap_err();
        assert!(matches!(err, ContentError::TooShort { .. }));
    }

    #[test]
    fn rejects_too_short_personal_info() {
        let err = ContentStore::new(plausible_background(), "hi").unwrap_err();
        assert!(matches!(err, ContentError::TooShort { .. }));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let store =
            ContentStore::new(format!("\n{}\n\n", plausible_background()), "  Based in Singapore.  ")
                .unwrap();
        assert!(!store.background().starts_with('\n'));
        assert!(!store.personal_info().starts_with(' '));
    }
}
