//! The pipeline orchestrator.
//!
//! Per query: build persona prompt → generate draft → assess quality →
//! optionally revise (once) → optionally append the call-to-action suffix →
//! append to the ledger → report diagnostics. Every non-empty query produces
//! exactly one response and exactly one ledger entry, error paths included.

use std::sync::Arc;

use emissary_core::error::Result;
use emissary_core::{
    Assessment, ContentStore, ConversationLedger, Generation, Persona, QualityVerdict,
};
use tracing::{debug, error, info, warn};

use crate::prompt;

/// Interaction count at which the call-to-action nudge kicks in, unless
/// overridden.
pub const DEFAULT_CALL_TO_ACTION_THRESHOLD: u32 = 8;

/// Fixed reply for an empty or whitespace-only query. Not a processed
/// interaction; the ledger does not grow.
const EMPTY_QUERY_REPLY: &str = "Please enter a message.";

/// Generic apology for faults the pipeline could not classify. Never leaks
/// internals to the end user.
const UNHANDLED_FAULT_REPLY: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again.";

/// The final response plus a human-readable diagnostic summary.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub final_response: String,
    pub diagnostics: String,
}

/// Read-only snapshot of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    pub total_interactions: u32,
    pub exchange_count: usize,
    pub threshold: u32,
}

/// The query-processing pipeline.
///
/// Owns the conversation ledger exclusively. `process_query` takes
/// `&mut self`, so queries against one pipeline are serialized by
/// construction and the ledger's count invariant cannot be raced.
pub struct Pipeline {
    content: ContentStore,
    persona: Persona,
    ledger: ConversationLedger,
    generation: Arc<dyn Generation>,
    assessment: Arc<dyn Assessment>,
    threshold: u32,
}

impl Pipeline {
    /// Create a pipeline over validated content with the default
    /// call-to-action threshold.
    pub fn new(
        content: ContentStore,
        persona: Persona,
        generation: Arc<dyn Generation>,
        assessment: Arc<dyn Assessment>,
    ) -> Self {
        Self {
            content,
            persona,
            ledger: ConversationLedger::new(),
            generation,
            assessment,
            threshold: DEFAULT_CALL_TO_ACTION_THRESHOLD,
        }
    }

    /// Override the call-to-action threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Process one user query to completion.
    ///
    /// Always returns a response string; internal faults are converted into
    /// a generic apology and recorded in the ledger like any other exchange,
    /// with the raw detail carried only in the diagnostics.
    pub async fn process_query(&mut self, query: &str) -> PipelineResult {
        if query.trim().is_empty() {
            return PipelineResult {
                final_response: EMPTY_QUERY_REPLY.into(),
                diagnostics: "Empty query rejected before processing".into(),
            };
        }

        match self.run(query).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Unhandled pipeline fault");
                self.ledger.append(query, UNHANDLED_FAULT_REPLY);
                PipelineResult {
                    final_response: UNHANDLED_FAULT_REPLY.into(),
                    diagnostics: format!("System error: {e}"),
                }
            }
        }
    }

    async fn run(&mut self, query: &str) -> Result<PipelineResult> {
        let suggest_call_to_action = self.ledger.interaction_count() >= self.threshold;

        let persona_prompt = prompt::persona_prompt(
            query,
            &self.content,
            &self.ledger,
            &self.persona,
            suggest_call_to_action,
        );

        let draft = match self.generation.generate(&persona_prompt).await {
            Ok(draft) => draft,
            Err(e) => {
                // Terminal for this query: no draft means nothing to assess.
                warn!(backend = self.generation.name(), error = %e, "Generation failed");
                let text = e.user_message();
                self.ledger.append(query, &text);
                return Ok(PipelineResult {
                    final_response: text,
                    diagnostics: format!("Generation error: {e}"),
                });
            }
        };

        let assess_prompt = prompt::assessment_prompt(query, &draft, &self.content);
        let verdict = match self.assessment.assess(&assess_prompt).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(backend = self.assessment.name(), error = %e, "Assessment failed, using default verdict");
                QualityVerdict::fallback(e)
            }
        };

        let mut final_response = draft.clone();
        let mut revision_note = String::new();

        // At most one revision attempt; a failed revision keeps the draft.
        if verdict.requires_revision {
            debug!(feedback = %verdict.feedback, "Verdict requires revision");
            let rev_prompt = prompt::revision_prompt(&persona_prompt, &draft, &verdict.feedback);
            match self.generation.generate(&rev_prompt).await {
                Ok(revised) => {
                    final_response = revised;
                    revision_note = format!("(Revised: {})", verdict.feedback);
                }
                Err(e) => {
                    warn!(error = %e, "Revision failed, keeping original draft");
                }
            }
        }

        // After revision, on whichever text is final. Skipped when the
        // response already carries the canonical URL, so never doubled.
        let mut call_to_action_appended = false;
        if suggest_call_to_action && !contains_ignore_case(&final_response, &self.persona.connection_url)
        {
            final_response.push_str(&self.persona.connection_invitation());
            call_to_action_appended = true;
        }

        self.ledger.append(query, &final_response);

        info!(
            score = verdict.confidence_score,
            revised = !revision_note.is_empty(),
            call_to_action = call_to_action_appended,
            interactions = self.ledger.interaction_count(),
            "Query processed"
        );

        let diagnostics =
            self.render_diagnostics(&verdict, &revision_note, call_to_action_appended);

        Ok(PipelineResult {
            final_response,
            diagnostics,
        })
    }

    fn render_diagnostics(
        &self,
        verdict: &QualityVerdict,
        revision_note: &str,
        call_to_action_appended: bool,
    ) -> String {
        format!(
            "Quality Score: {:.2}\n\
             Professional: {}\n\
             Relevant: {}\n\
             Based on Source: {}\n\
             {}\n\
             Interaction Count: {}\n\
             Call-to-action Suggested: {}",
            verdict.confidence_score,
            verdict.is_professional,
            verdict.is_relevant,
            verdict.is_based_on_source,
            revision_note,
            self.ledger.interaction_count(),
            call_to_action_appended,
        )
    }

    /// Clear the conversation ledger (exchanges and counter as a unit).
    pub fn reset(&mut self) {
        self.ledger.clear();
        info!("Conversation ledger reset");
    }

    /// Read-only snapshot of session statistics.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            total_interactions: self.ledger.interaction_count(),
            exchange_count: self.ledger.len(),
            threshold: self.threshold,
        }
    }

    /// The recorded exchanges, oldest first.
    pub fn exchanges(&self) -> &[emissary_core::Exchange] {
        self.ledger.exchanges()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
