//! Gemini assessment backend.
//!
//! Calls the Google Generative Language `generateContent` endpoint and
//! parses the reply through the strict verdict parser. Parse failures are
//! reported as [`AssessmentError::MalformedVerdict`]; the pipeline downgrades
//! any assessment failure to the safe-default verdict.

use async_trait::async_trait;
use emissary_core::error::AssessmentError;
use emissary_core::{Assessment, QualityVerdict};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::verdict_parse::parse_verdict;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A Gemini-backed quality assessor.
pub struct GeminiAssessment {
    name: String,
    api_base: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiAssessment {
    /// Create a new Gemini assessment backend.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AssessmentError> {
        Self::with_api_base(DEFAULT_API_BASE, api_key, model)
    }

    /// Create a backend against a non-default API base (used in tests).
    pub fn with_api_base(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AssessmentError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| AssessmentError::Network(e.to_string()))?;

        Ok(Self {
            name: "gemini".into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl Assessment for GeminiAssessment {
    fn name(&self) -> &str {
        &self.name
    }

    async fn assess(&self, prompt: &str) -> Result<QualityVerdict, AssessmentError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(backend = %self.name, model = %self.model, "Sending assessment request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssessmentError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Assessment backend returned error");
            return Err(AssessmentError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| AssessmentError::Api {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let text = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssessmentError::Empty);
        }

        let verdict = parse_verdict(&text)
            .map_err(|e| AssessmentError::MalformedVerdict(e.to_string()))?;

        debug!(
            backend = %self.name,
            score = verdict.confidence_score,
            requires_revision = verdict.requires_revision,
            "Assessment complete"
        );
        Ok(verdict)
    }
}

// --- Gemini API wire types ---

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    content: ApiContent,
}

#[derive(Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Deserialize)]
struct ApiPart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_response() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "{\"ok\": true}" }] } }
            ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "{\"ok\": true}");
    }

    #[test]
    fn tolerates_missing_candidates() {
        let parsed: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn strips_trailing_slash_from_api_base() {
        let backend =
            GeminiAssessment::with_api_base("https://example.test/v1beta/", "key", "gemini-2.0")
                .unwrap();
        assert_eq!(backend.api_base, "https://example.test/v1beta");
    }
}
