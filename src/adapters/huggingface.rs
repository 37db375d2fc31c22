//! Hugging Face adapter for chat completions.
//!
//! Talks to the OpenAI-compatible `/chat/completions` endpoint exposed by
//! the Hugging Face inference router.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LanguageModel, ModelError, ModelOutput, Prompt};
use crate::config::ModelSettings;

/// Inference router endpoint
pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/v1";

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Hugging Face chat-completions adapter
pub struct HuggingFaceAdapter {
    api_base: String,
    api_token: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

/// Error body returned by the router. Some backends nest the message under
/// `error.message`, others return `error` as a plain string.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorBody {
    Detailed { message: String },
    Plain(String),
}

impl ApiErrorBody {
    fn into_message(self) -> String {
        match self {
            Self::Detailed { message } => message,
            Self::Plain(message) => message,
        }
    }
}

impl HuggingFaceAdapter {
    /// Create an adapter from resolved model settings and the API token
    pub fn new(settings: &ModelSettings, api_token: impl Into<String>) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| ModelError::Client(e.to_string()))?;

        Ok(Self {
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// Map a non-success response to a `ModelError`
    async fn error_from_response(response: reqwest::Response) -> ModelError {
        let code = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error response".to_string());

        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => parsed.error.into_message(),
            Err(_) => body,
        };

        if code == 429 {
            ModelError::RateLimited(message)
        } else {
            ModelError::Api { code, message }
        }
    }
}

#[async_trait]
impl LanguageModel for HuggingFaceAdapter {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<ModelOutput, ModelError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        let tokens = parsed.usage.map(|u| u.total_tokens);
        // An empty choice list is passed on as empty text; the orchestrator
        // decides whether that means "nothing generated".
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(model = %self.model, chars = content.len(), ?tokens, "Model call finished");

        let output = ModelOutput::new(content);
        Ok(match tokens {
            Some(t) => output.with_tokens(t),
            None => output,
        })
    }

    async fn health_check(&self) -> Result<(), ModelError> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }
}
