//! Capability traits — the abstraction over the two LLM backends.
//!
//! The pipeline calls `generate()` and `assess()` without knowing which
//! backend is behind them — pure polymorphism. Implementations live in the
//! providers crate; tests substitute scripted stubs.

use async_trait::async_trait;
use crate::error::{AssessmentError, GenerationError};
use crate::verdict::QualityVerdict;

/// Text in, text out. May fail; must return non-empty text on success.
///
/// Timeouts and cancellation are the implementation's concern and must
/// surface as ordinary [`GenerationError`]s.
#[async_trait]
pub trait Generation: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai").
    fn name(&self) -> &str;

    /// Generate a response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Text in, structured verdict out.
///
/// Callers must substitute [`QualityVerdict::fallback`] on any failure —
/// a broken assessor never blocks delivery of an existing draft.
#[async_trait]
pub trait Assessment: Send + Sync {
    /// A human-readable name for this backend (e.g., "gemini").
    fn name(&self) -> &str;

    /// Judge a draft response against the evaluation criteria embedded in
    /// the prompt.
    async fn assess(&self, prompt: &str) -> Result<QualityVerdict, AssessmentError>;
}
