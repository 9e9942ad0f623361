use thiserror::Error;

/// Top-level error type for the Hale engine.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for HaleError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HaleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge error: {0}")]
    Knowledge(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for HaleError {
    fn from(err: toml::de::Error) -> Self {
        HaleError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HaleError {
    fn from(err: toml::ser::Error) -> Self {
        HaleError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HaleError {
    fn from(err: serde_json::Error) -> Self {
        HaleError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Hale operations.
pub type Result<T> = std::result::Result<T, HaleError>;
