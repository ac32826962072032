//! Shared scripted stubs for pipeline tests.
//!
//! Each stub returns the next scripted result per call, records the prompt
//! it was given, and counts invocations so tests can assert which capability
//! calls actually happened.

use async_trait::async_trait;
use emissary_core::error::{AssessmentError, GenerationError};
use emissary_core::{Assessment, Generation, QualityVerdict};
use std::sync::Mutex;

enum Script<T> {
    /// Return results in order; panic when exhausted.
    Sequence(Vec<T>),
    /// Return a clone of the same result on every call.
    Repeat(T),
}

impl<T: Clone> Script<T> {
    fn next(&self, call_index: usize) -> T {
        match self {
            Script::Sequence(items) => items
                .get(call_index)
                .unwrap_or_else(|| {
                    panic!(
                        "scripted stub: no result for call #{} (have {})",
                        call_index,
                        items.len()
                    )
                })
                .clone(),
            Script::Repeat(item) => item.clone(),
        }
    }
}

/// A generation stub returning scripted responses.
pub struct ScriptedGeneration {
    script: Script<Result<String, GenerationError>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGeneration {
    pub fn with_responses(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Script::Sequence(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(text: &str) -> Self {
        Self {
            script: Script::Repeat(Ok(text.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The prompt recorded for call `index` (0-based).
    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl Generation for ScriptedGeneration {
    fn name(&self) -> &str {
        "scripted_generation"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut prompts = self.prompts.lock().unwrap();
        let call_index = prompts.len();
        prompts.push(prompt.to_string());
        self.script.next(call_index)
    }
}

/// An assessment stub returning scripted verdicts.
pub struct ScriptedAssessment {
    script: Script<Result<QualityVerdict, AssessmentError>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedAssessment {
    pub fn with_verdicts(verdicts: Vec<Result<QualityVerdict, AssessmentError>>) -> Self {
        Self {
            script: Script::Sequence(verdicts),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn repeating(verdict: QualityVerdict) -> Self {
        Self {
            script: Script::Repeat(Ok(verdict)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// An assessor that fails every call with a malformed-verdict error.
    pub fn failing(reason: &str) -> Self {
        Self {
            script: Script::Repeat(Err(AssessmentError::MalformedVerdict(reason.to_string()))),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Assessment for ScriptedAssessment {
    fn name(&self) -> &str {
        "scripted_assessment"
    }

    async fn assess(&self, prompt: &str) -> Result<QualityVerdict, AssessmentError> {
        let mut prompts = self.prompts.lock().unwrap();
        let call_index = prompts.len();
        prompts.push(prompt.to_string());
        self.script.next(call_index)
    }
}
