//! # Emissary Pipeline
//!
//! The query-processing pipeline: prompt construction, generation, automated
//! quality assessment, conditional revision, and the call-to-action nudge.
//! One user message in, one final response plus diagnostics out.
//!
//! The pipeline owns the conversation ledger exclusively and runs each query
//! synchronously to completion. Callers serialize invocation by holding
//! `&mut Pipeline`; hosts needing shared access wrap the pipeline in their
//! own lock.

pub mod orchestrator;
pub mod prompt;

#[cfg(test)]
mod test_helpers;

pub use orchestrator::{Pipeline, PipelineResult, PipelineStats, DEFAULT_CALL_TO_ACTION_THRESHOLD};
