//! Chat orchestrator: the full request lifecycle.
//!
//! Resolves catalog and instructions, retrieves knowledge, assembles the
//! system prompt, calls the language model, and post-processes the reply
//! into a structured response. Each call is a single linear pipeline with
//! no retained state.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use hale_core::config::HaleConfig;
use hale_core::types::{
    CatalogProduct, ChatRequest, ChatResponse, ChatRole, ConversationMessage, SourceRef,
};
use hale_knowledge::{KnowledgeStats, KnowledgeStore, ScoredArticle};

use crate::adapter::CatalogAdapter;
use crate::error::ChatError;
use crate::model::LanguageModel;
use crate::postprocess;
use crate::prompt::{PersonaPromptBuilder, PromptInput};

/// Central coordinator for coaching chat requests.
pub struct ChatOrchestrator {
    store: Arc<KnowledgeStore>,
    model: Arc<dyn LanguageModel>,
    adapter: Option<Arc<dyn CatalogAdapter>>,
    max_sources: usize,
    max_message_length: usize,
}

impl ChatOrchestrator {
    /// Create a new orchestrator.
    ///
    /// Fails with [`ChatError::Configuration`] when the model configuration
    /// is incomplete. This is checked once here, before any request is
    /// attempted.
    pub fn new(
        store: Arc<KnowledgeStore>,
        model: Arc<dyn LanguageModel>,
        adapter: Option<Arc<dyn CatalogAdapter>>,
        config: &HaleConfig,
    ) -> Result<Self, ChatError> {
        config.model.validate()?;
        Ok(Self {
            store,
            model,
            adapter,
            max_sources: config.knowledge.max_sources,
            max_message_length: config.chat.max_message_length,
        })
    }

    /// Handle one chat request end to end.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        if request.message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if request.message.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let request_id = Uuid::new_v4();
        debug!(%request_id, history = request.history.len(), "chat request received");

        // Context values win over adapter defaults; the adapter is a
        // fallback source, not an override.
        let context = request.context.as_ref();
        let products: Vec<CatalogProduct> = context
            .and_then(|c| c.products.clone())
            .or_else(|| self.adapter.as_ref().map(|a| a.products()))
            .unwrap_or_default();
        let custom_instructions: String = context
            .and_then(|c| c.custom_instructions.clone())
            .or_else(|| self.adapter.as_ref().map(|a| a.custom_instructions()))
            .unwrap_or_default();

        let knowledge_context = self.store.build_context(&request.message, self.max_sources);

        let profile = context.and_then(|c| c.profile.as_ref());
        let health = context.and_then(|c| c.health.as_ref());

        let system_prompt = PersonaPromptBuilder::build(&PromptInput {
            profile,
            health,
            products: &products,
            knowledge_context: &knowledge_context,
            custom_instructions: &custom_instructions,
        });

        // The assembled prompt is the only system message; system entries in
        // caller-supplied history are dropped.
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ConversationMessage::system(system_prompt));
        messages.extend(
            request
                .history
                .iter()
                .filter(|m| matches!(m.role, ChatRole::User | ChatRole::Assistant))
                .cloned(),
        );
        messages.push(ConversationMessage::user(request.message.clone()));

        let completion = self.model.complete(&messages).await?;
        debug!(
            %request_id,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "model call finished"
        );

        let mut text = completion.text;
        if let Some(adapter) = &self.adapter {
            if let Some(processed) = adapter.process_response(&text) {
                text = processed;
            }
        }

        let mentioned = postprocess::extract_mentioned_products(&text, &products);

        // Catalog-driven link pass. It can overlap with the adapter hook
        // above; both rewrites are idempotent, so the overlap is safe.
        if let Some(adapter) = &self.adapter {
            if !products.is_empty() {
                text = postprocess::link_product_mentions(&text, &products, &|name| {
                    adapter.format_product_link(name)
                });
            }
        }

        let sources: Vec<SourceRef> = self
            .store
            .search(&request.message, self.max_sources)
            .into_iter()
            .map(|hit| SourceRef {
                title: hit.article.title,
                url: hit.article.url,
                relevance: hit.score,
            })
            .collect();

        let follow_ups = postprocess::follow_up_questions(profile, health);

        info!(
            %request_id,
            sources = sources.len(),
            mentioned = mentioned.len(),
            "chat request completed"
        );

        Ok(ChatResponse {
            message: text,
            sources: none_if_empty(sources),
            mentioned_products: none_if_empty(mentioned),
            follow_up_questions: none_if_empty(follow_ups),
            usage: completion.usage,
        })
    }

    /// Direct retrieval access, bypassing prompt assembly.
    pub fn search_knowledge(&self, query: &str, max_results: usize) -> Vec<ScoredArticle> {
        self.store.search(query, max_results)
    }

    /// Corpus statistics.
    pub fn knowledge_stats(&self) -> KnowledgeStats {
        self.store.stats()
    }
}

fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// =============================================================================
// Tests
// =============================================================================
