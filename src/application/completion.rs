// src/application/completion.rs
use crate::domain::DomainError;
use async_trait::async_trait;

/// One system + user exchange sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    /// Ask the service for syntactically valid JSON instead of free text
    pub json_mode: bool,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one request and return the assistant message content as-is.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, DomainError>;
}
