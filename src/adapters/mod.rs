//! Adapter interfaces for the language-model service.
//!
//! The orchestrator only talks to [`LanguageModel`]; the Hugging Face
//! adapter is the production implementation and tests plug in scripted
//! models.

pub mod huggingface;

use async_trait::async_trait;
use thiserror::Error;

pub use huggingface::{HuggingFaceAdapter, DEFAULT_API_BASE, DEFAULT_MODEL};

/// A rendered prompt for a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Persona instructions
    pub system: String,

    /// Task text plus the context gathered from earlier steps
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Output from a model invocation
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// The text returned by the model
    pub content: String,

    /// Tokens used (if available)
    pub tokens_used: Option<u64>,
}

impl ModelOutput {
    /// Create a new model output with just content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tokens_used: None,
        }
    }

    pub fn with_tokens(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }

    /// True when the model produced nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Errors raised by the model-invocation layer
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Failed to parse model response: {0}")]
    Parse(String),
}

/// Trait for text-generation backends
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Model identifier sent with each request
    fn model_id(&self) -> &str;

    /// Run one blocking completion for a prompt
    async fn complete(&self, prompt: &Prompt) -> Result<ModelOutput, ModelError>;

    /// Check that the service is reachable and the credential is accepted
    async fn health_check(&self) -> Result<(), ModelError>;
}
