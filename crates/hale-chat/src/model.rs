//! Language-model client boundary.
//!
//! The engine treats text generation as a black box: an ordered message
//! list goes in, generated text and token counts come out. Concrete HTTP
//! clients live with the hosting application; [`MockModel`] covers tests
//! and offline composition.

use async_trait::async_trait;

use hale_core::types::{ConversationMessage, TokenUsage};

use crate::error::ChatError;

/// Result of a single model call.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    /// Generated assistant text.
    pub text: String,
    /// Token counts reported by the service.
    pub usage: TokenUsage,
}

/// A chat-completion language model.
///
/// One awaited call per request, no streaming, no retries. The engine
/// imposes no timeout; callers needing bounded latency wrap the whole
/// `chat()` call.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to the given message sequence.
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<Completion, ChatError>;
}

/// Scripted model that always replies with a fixed text.
///
/// Token counts are whitespace word counts, which is close enough for
/// asserting that usage is plumbed through.
pub struct MockModel {
    reply: String,
}

impl MockModel {
    /// Create a mock that replies with `reply` on every call.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<Completion, ChatError> {
        let input_tokens: u32 = messages
            .iter()
            .map(|m| m.content.split_whitespace().count() as u32)
            .sum();
        Ok(Completion {
            text: self.reply.clone(),
            usage: TokenUsage {
                input_tokens,
                output_tokens: self.reply.split_whitespace().count() as u32,
            },
        })
    }
}
