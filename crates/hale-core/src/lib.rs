//! Shared foundation for the Hale coaching engine.
//!
//! Provides configuration loading, the top-level error type, the domain
//! types exchanged between the knowledge store, prompt assembly, and the
//! chat orchestrator, and the tracing bootstrap.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{ChatConfig, GeneralConfig, HaleConfig, KnowledgeConfig, ModelConfig};
pub use error::{HaleError, Result};
pub use types::*;
