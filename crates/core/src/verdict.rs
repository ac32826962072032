//! The quality verdict — structured output of the assessment capability.
//!
//! Malformed or failed assessments are normalized into a documented safe
//! default instead of propagating: a missing verdict must never block
//! delivery of an already-generated draft.

use serde::{Deserialize, Serialize};

/// Confidence score assigned when assessment fails and the default verdict
/// is substituted.
pub const FALLBACK_CONFIDENCE: f32 = 0.8;

/// A structured judgment of one draft response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityVerdict {
    /// Professional tone, appropriate for a recruiter audience.
    pub is_professional: bool,

    /// Addresses the user's actual question.
    pub is_relevant: bool,

    /// Grounded solely in the supplied source documents.
    pub is_based_on_source: bool,

    /// Assessor confidence, clamped to [0, 1].
    pub confidence_score: f32,

    /// Free-text feedback for improvement (or the failure reason when the
    /// default verdict was substituted).
    pub feedback: String,

    /// Whether the draft should go through one revision pass.
    pub requires_revision: bool,
}

impl QualityVerdict {
    /// Construct a verdict, clamping the score into [0, 1].
    pub fn new(
        is_professional: bool,
        is_relevant: bool,
        is_based_on_source: bool,
        confidence_score: f32,
        feedback: impl Into<String>,
        requires_revision: bool,
    ) -> Self {
        Self {
            is_professional,
            is_relevant,
            is_based_on_source,
            confidence_score: confidence_score.clamp(0.0, 1.0),
            feedback: feedback.into(),
            requires_revision,
        }
    }

    /// The documented safe default, substituted whenever assessment fails.
    ///
    /// Conservative in the "do no harm" sense: it passes the draft through
    /// unrevised rather than triggering revision on a verdict nobody issued.
    pub fn fallback(reason: impl std::fmt::Display) -> Self {
        Self {
            is_professional: true,
            is_relevant: true,
            is_based_on_source: true,
            confidence_score: FALLBACK_CONFIDENCE,
            feedback: format!("Quality check failed: {reason}"),
            requires_revision: false,
        }
    }

    /// Clamp the score into [0, 1], for verdicts built by deserialization.
    pub fn clamped(mut self) -> Self {
        self.confidence_score = self.confidence_score.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range_scores() {
        let high = QualityVerdict::new(true, true, true, 1.7, "", false);
        assert_eq!(high.confidence_score, 1.0);
        let low = QualityVerdict::new(true, true, true, -0.2, "", false);
        assert_eq!(low.confidence_score, 0.0);
    }

    #[test]
    fn fallback_passes_the_draft_through() {
        let verdict = QualityVerdict::fallback("connection refused");
        assert!(verdict.is_professional);
        assert!(verdict.is_relevant);
        assert!(verdict.is_based_on_source);
        assert!(!verdict.requires_revision);
        assert_eq!(verdict.confidence_score, FALLBACK_CONFIDENCE);
        assert!(verdict.feedback.contains("connection refused"));
    }

    #[test]
    fn deserializes_from_assessor_json() {
        let json = r#"{
            "is_professional": true,
            "is_relevant": false,
            "is_based_on_source": true,
            "confidence_score": 0.55,
            "feedback": "Does not address the question about tenure.",
            "requires_revision": true
        }"#;
        let verdict: QualityVerdict = serde_json::from_str(json).unwrap();
        assert!(!verdict.is_relevant);
        assert!(verdict.requires_revision);
        assert!((verdict.confidence_score - 0.55).abs() < f32::EPSILON);
    }
}
