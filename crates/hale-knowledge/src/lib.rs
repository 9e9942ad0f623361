//! Static knowledge corpus for the coaching engine.
//!
//! Loads a category index and condensed article list from a dataset
//! directory, caches the parsed dataset process-wide, and exposes keyword
//! search, context rendering, and category browsing.

pub mod article;
pub mod dataset;
pub mod store;

pub use article::{KnowledgeArticle, KnowledgeStats, ScoredArticle};
pub use store::KnowledgeStore;
