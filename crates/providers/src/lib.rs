//! Capability backends for Emissary.
//!
//! All backends implement the `emissary_core::Generation` or
//! `emissary_core::Assessment` trait. The pipeline never depends on a
//! concrete backend.

pub mod gemini;
pub mod openai;
pub mod verdict_parse;

pub use gemini::GeminiAssessment;
pub use openai::OpenAiGeneration;
pub use verdict_parse::{parse_verdict, VerdictParseError};
