//! Completion client: one chat-completions request per submission.

pub mod api;
mod client;
mod error;

pub use client::{CompletionClient, CompletionResult, OpenAiClient};
