//! HTTP client for the chat-completions API (POST, bearer auth, JSON body).

use async_trait::async_trait;
use tracing::{debug, warn};

use super::api::{ApiErrorEnvelope, ChatRequest, ChatResponse};
use super::error::CompletionError;
use crate::config::Config;

/// Outcome of one round trip, ready to be recorded as an exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionResult {
    Success(String),
    /// Human-readable description of what went wrong.
    Failure(String),
}

impl From<Result<String, CompletionError>> for CompletionResult {
    fn from(result: Result<String, CompletionError>) -> Self {
        match result {
            Ok(answer) => Self::Success(answer),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

/// Sends a single user prompt and resolves to a [`CompletionResult`].
///
/// Implementations never return an error or panic: every failure is folded
/// into [`CompletionResult::Failure`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionResult;
}

pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, prompt: &str) -> Result<ChatResponse, CompletionError> {
        let body = ChatRequest::single_turn(&self.model, prompt);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            // Bodies without the error envelope go through the normal decode
            // below and surface as decode failures.
            if let Ok(envelope) = serde_json::from_slice::<ApiErrorEnvelope>(&bytes) {
                warn!(status = status.as_u16(), kind = ?envelope.error.kind, "API rejected request");
                return Err(CompletionError::Status {
                    status: status.as_u16(),
                    message: envelope.error.message,
                });
            }
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> CompletionResult {
        let result = self.request(prompt).await.map(|response| {
            let usage = response.usage.as_ref();
            debug!(
                id = %response.id,
                model = %response.model,
                choices = response.choices.len(),
                finish_reason = ?response.choices.first().and_then(|c| c.finish_reason.as_deref()),
                prompt_tokens = ?usage.and_then(|u| u.prompt_tokens),
                completion_tokens = ?usage.and_then(|u| u.completion_tokens),
                total_tokens = ?usage.and_then(|u| u.total_tokens),
                "completion received"
            );
            response.answer()
        });
        if let Err(e) = &result {
            warn!(error = %e, "completion failed");
        }
        result.into()
    }
}
