//! # Emissary Core
//!
//! Domain types, traits, and error definitions for the Emissary persona
//! assistant. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The two network-facing capabilities (text generation and quality
//! assessment) are defined as traits here. Implementations live in the
//! providers crate. This enables:
//! - Swapping backends via configuration
//! - Easy testing with scripted stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod capability;
pub mod content;
pub mod error;
pub mod ledger;
pub mod persona;
pub mod verdict;

// Re-export key types at crate root for ergonomics
pub use capability::{Assessment, Generation};
pub use content::ContentStore;
pub use error::{AssessmentError, ContentError, Error, GenerationError, Result};
pub use ledger::{ConversationLedger, Exchange};
pub use persona::Persona;
pub use verdict::QualityVerdict;
