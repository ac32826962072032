//! Error types for the Emissary domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Emissary operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Generation errors ---
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    // --- Assessment errors ---
    #[error("Assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    // --- Content errors ---
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the text-generation capability.
///
/// The pipeline treats any variant uniformly as "no usable draft"; the
/// variants exist so providers can classify what went wrong and so
/// [`user_message`](GenerationError::user_message) can phrase it safely.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Provider returned an empty response")]
    Empty,

    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl GenerationError {
    /// A descriptive, user-safe message suitable for returning in place of
    /// a response. Never exposes keys, URLs, or raw provider payloads.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited { .. } => {
                "Error: The assistant is receiving too many requests right now. \
                 Please try again in a moment."
                    .into()
            }
            Self::AuthFailed(_) => {
                "Error: The assistant could not authenticate with its language \
                 service. Please contact the operator."
                    .into()
            }
            Self::Empty => {
                "Error: The assistant produced no response. Please try rephrasing \
                 your question."
                    .into()
            }
            Self::Api { .. } | Self::Network(_) => {
                "Error: The assistant could not reach its language service. \
                 Please try again later."
                    .into()
            }
        }
    }
}

/// Failures of the quality-assessment capability.
///
/// Always downgraded to a safe-default verdict by the caller — never
/// surfaced to the end user.
#[derive(Debug, Clone, Error)]
pub enum AssessmentError {
    #[error("Malformed verdict: {0}")]
    MalformedVerdict(String),

    #[error("Provider returned an empty assessment")]
    Empty,

    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures while ingesting or validating source content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content file not found: {path}")]
    NotFound { path: String },

    #[error("Content is empty: {what}")]
    Empty { what: String },

    #[error("Content too short to be usable: {what} ({len} chars, need {min})")]
    TooShort {
        what: String,
        len: usize,
        min: usize,
    },

    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_displays_correctly() {
        let err = Error::Generation(GenerationError::Api {
            status_code: 500,
            message: "upstream exploded".into(),
        });
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn user_message_never_leaks_detail() {
        let err = GenerationError::AuthFailed("key sk-abc123 rejected".into());
        let msg = err.user_message();
        assert!(msg.starts_with("Error:"));
        assert!(!msg.contains("sk-abc123"));
    }

    #[test]
    fn rate_limit_user_message_is_retryable_phrasing() {
        let err = GenerationError::RateLimited {
            retry_after_secs: 5,
        };
        assert!(err.user_message().contains("try again"));
    }

    #[test]
    fn content_error_names_the_field() {
        let err = ContentError::TooShort {
            what: "background document".into(),
            len: 12,
            min: 100,
        };
        assert!(err.to_string().contains("background document"));
        assert!(err.to_string().contains("100"));
    }
}
