//! Error types for the chat engine.

use hale_core::HaleError;

/// Errors from the coaching chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("model error: {0}")]
    Model(String),
    #[error("knowledge error: {0}")]
    Knowledge(String),
}

impl From<HaleError> for ChatError {
    fn from(err: HaleError) -> Self {
        match err {
            HaleError::Config(msg) => ChatError::Configuration(msg),
            HaleError::Model(msg) => ChatError::Model(msg),
            other => ChatError::Knowledge(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Configuration("no api key".to_string());
        assert_eq!(err.to_string(), "configuration error: no api key");

        let err = ChatError::EmptyMessage;
        assert_eq!(err.to_string(), "message cannot be empty");

        let err = ChatError::MessageTooLong(2000);
        assert_eq!(
            err.to_string(),
            "message exceeds maximum length of 2000 characters"
        );

        let err = ChatError::Model("upstream timeout".to_string());
        assert_eq!(err.to_string(), "model error: upstream timeout");

        let err = ChatError::Knowledge("bad dataset".to_string());
        assert_eq!(err.to_string(), "knowledge error: bad dataset");
    }

    #[test]
    fn test_from_hale_config_error() {
        let err: ChatError = HaleError::Config("missing key".to_string()).into();
        assert!(matches!(err, ChatError::Configuration(_)));
        assert!(err.to_string().contains("missing key"));
    }

    #[test]
    fn test_from_hale_model_error() {
        let err: ChatError = HaleError::Model("http 500".to_string()).into();
        assert!(matches!(err, ChatError::Model(_)));
    }

    #[test]
    fn test_from_hale_other_errors_map_to_knowledge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ChatError = HaleError::from(io_err).into();
        assert!(matches!(err, ChatError::Knowledge(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ChatError::EmptyMessage);
        assert!(dbg.contains("EmptyMessage"));
    }
}
