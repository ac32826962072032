//! Source document ingestion for Emissary.
//!
//! Loads the subject's background document and personal-info blurb from
//! disk and hands validated text to [`ContentStore`]. Content problems are
//! fatal at startup — the pipeline never serves queries over missing or
//! implausible source material.

use std::path::Path;

use emissary_core::error::ContentError;
use emissary_core::ContentStore;
use tracing::{info, warn};

/// Load the long-form background document (plain text or markdown).
pub fn load_background(path: &Path) -> Result<String, ContentError> {
    let text = read_text(path, "background document")?;
    info!(path = %path.display(), chars = text.len(), "Loaded background document");
    Ok(text)
}

/// Load the short personal-info blurb.
pub fn load_personal_info(path: &Path) -> Result<String, ContentError> {
    let text = read_text(path, "personal info")?;
    info!(path = %path.display(), chars = text.len(), "Loaded personal info");
    Ok(text)
}

/// Load both documents and build a validated [`ContentStore`].
pub fn load_store(
    background_path: &Path,
    personal_info_path: &Path,
) -> Result<ContentStore, ContentError> {
    let background = load_background(background_path)?;
    let personal_info = load_personal_info(personal_info_path)?;
    ContentStore::new(background, personal_info)
}

fn read_text(path: &Path, what: &str) -> Result<String, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let text = raw.trim().to_string();
    if text.is_empty() {
        warn!(path = %path.display(), "{what} file is empty");
        return Err(ContentError::Empty { what: what.into() });
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    const BACKGROUND: &str = "Global CIO with twenty years of experience leading \
        IT organizations across manufacturing and private equity portfolio \
        companies, including large-scale ERP and cloud transformations.";

    #[test]
    fn loads_and_trims_documents() {
        let file = write_temp("  Based in Singapore, open to relocation.\n");
        let text = load_personal_info(file.path()).unwrap();
        assert_eq!(text, "Based in Singapore, open to relocation.");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_background(Path::new("/nonexistent/background.md")).unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = write_temp("   \n\n  ");
        let err = load_personal_info(file.path()).unwrap_err();
        assert!(matches!(err, ContentError::Empty { .. }));
    }

    #[test]
    fn load_store_builds_a_validated_store() {
        let background = write_temp(BACKGROUND);
        let info = write_temp("Based in Singapore.");
        let store = load_store(background.path(), info.path()).unwrap();
        assert!(store.background().contains("Global CIO"));
    }

    #[test]
    fn load_store_rejects_short_background() {
        let background = write_temp("CV pending.");
        let info = write_temp("Based in Singapore.");
        let err = load_store(background.path(), info.path()).unwrap_err();
        assert!(matches!(err, ContentError::TooShort { .. }));
    }
}
