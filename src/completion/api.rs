//! Wire types for the chat-completions endpoint (request body, response envelope).

use serde::{Deserialize, Serialize};

/// Answer recorded when the envelope decodes but carries no content.
pub const NO_RESPONSE: &str = "No response received";

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Single-turn request: one user message, no prior context.
    pub fn single_turn(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        }
    }
}

/// Top-level response envelope. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    #[allow(dead_code)]
    pub object: String,
    #[allow(dead_code)]
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[allow(dead_code)]
    pub index: u32,
    pub message: MessageContent,
    /// Accepted in any shape; never inspected.
    #[allow(dead_code)]
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageContent {
    #[allow(dead_code)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default, alias = "promptTokens")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, alias = "completionTokens")]
    pub completion_tokens: Option<u64>,
    #[serde(default, alias = "totalTokens")]
    pub total_tokens: Option<u64>,
}

impl ChatResponse {
    /// Content of the first choice, or [`NO_RESPONSE`] when there is none.
    pub fn answer(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_RESPONSE.to_string())
    }
}

/// Error body returned with non-2xx statuses: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
