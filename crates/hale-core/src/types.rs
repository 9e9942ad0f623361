use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Conversation
// =============================================================================

/// Role of a message in a model conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

/// A single message in a conversation transcript.
///
/// History lists are caller-owned and passed by value on every request; the
/// engine never mutates or persists them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ConversationMessage {
    /// A user-authored message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// A model-authored message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// A system instruction message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A product in a host-supplied catalog.
///
/// `name` must be unique within a catalog; substring matching and link
/// rewriting depend on it. Catalogs guarantee this, the engine does not
/// enforce it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

// =============================================================================
// User context
// =============================================================================

/// Profile details supplied by the hosting application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub goals: Vec<String>,
    pub symptoms: Vec<String>,
}

/// One lab measurement from the user's recent records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    /// Marker name, e.g. "Total Testosterone".
    pub marker: String,
    /// Measured value as the host reports it.
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<NaiveDate>,
}

/// A symptom the user logged recently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub description: String,
    /// Severity on a 1-10 scale, when the host tracks it.
    #[serde(default)]
    pub severity: Option<u8>,
    #[serde(default)]
    pub recorded_at: Option<NaiveDate>,
}

/// Recent health metrics supplied by the hosting application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthData {
    pub lab_results: Vec<LabResult>,
    pub recent_symptoms: Vec<SymptomEntry>,
}

/// Host-supplied context for one request.
///
/// When both a context value and an adapter are present, the context value
/// wins; the adapter is a fallback source, not an override.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    pub profile: Option<UserProfile>,
    pub health: Option<HealthData>,
    pub products: Option<Vec<CatalogProduct>>,
    pub custom_instructions: Option<String>,
}

// =============================================================================
// Request / response
// =============================================================================

/// One chat request from the hosting application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationMessage>,
    #[serde(default)]
    pub context: Option<RequestContext>,
}

impl ChatRequest {
    /// A request carrying only a message, no history or context.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            context: None,
        }
    }
}

/// A cited knowledge source with its query-time relevance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub relevance: i64,
}

/// Token counts reported by the language-model service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The structured result of one chat request.
///
/// The optional lists are `None` when their computed value is empty, so they
/// disappear from serialized output; `usage` always reflects the model call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_products: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
    pub usage: TokenUsage,
}

// =============================================================================
// Tests
// =============================================================================
