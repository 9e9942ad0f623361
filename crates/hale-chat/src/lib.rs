//! Coaching chat engine.
//!
//! Ties catalog adapters, prompt assembly, the language-model boundary, and
//! response post-processing into a single request pipeline.

pub mod adapter;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod postprocess;
pub mod prompt;

pub use adapter::{CatalogAdapter, StaticCatalogAdapter, TrackedCatalogAdapter};
pub use error::ChatError;
pub use model::{Completion, LanguageModel, MockModel};
pub use orchestrator::ChatOrchestrator;
pub use prompt::{PersonaPromptBuilder, PromptInput, PERSONA};
