//! Strict parsing of assessor output into a [`QualityVerdict`].
//!
//! Deserialize into a strict schema; on any schema violation return a tagged
//! error so the caller can substitute the documented safe default. The parse
//! itself never fabricates a verdict.

use emissary_core::QualityVerdict;
use thiserror::Error;

/// Why assessor output could not be parsed into a verdict.
#[derive(Debug, Clone, Error)]
pub enum VerdictParseError {
    #[error("assessor returned empty output")]
    EmptyOutput,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Parse raw assessor output into a verdict.
///
/// Tolerates the output being wrapped in a markdown code fence (with or
/// without a `json` language tag) — a common model habit — but is otherwise
/// strict: every field of the verdict schema must be present and typed
/// correctly. The confidence score is clamped into [0, 1] after parsing.
pub fn parse_verdict(raw: &str) -> Result<QualityVerdict, VerdictParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VerdictParseError::EmptyOutput);
    }

    let json_str = strip_code_fence(trimmed);

    let verdict: QualityVerdict = serde_json::from_str(json_str)
        .map_err(|e| VerdictParseError::InvalidJson(e.to_string()))?;

    Ok(verdict.clamped())
}

/// Strip a surrounding ```json ... ``` or ``` ... ``` fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
