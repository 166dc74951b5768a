// src/infrastructure/openai.rs
use crate::application::{CompletionClient, CompletionRequest};
use crate::constants::UPSTREAM_BODY_PREVIEW_CHARS;
use crate::domain::DomainError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Chat completions client for OpenAI-compatible endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    endpoint: String,
    organization: Option<String>,
    project: Option<String>,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .build()
            .context("Failed to initialize HTTP client for the completion service")?;

        Ok(Self {
            endpoint: endpoint.into(),
            organization: None,
            project: None,
            http,
        })
    }

    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|o| !o.is_empty());
        self
    }

    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project.filter(|p| !p.is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(level = "debug", skip(self, request), fields(endpoint = %self.endpoint, model = request.model))]
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, DomainError> {
        let payload = ChatCompletionRequest {
            model: request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut builder = self
            .http
            .post(&self.endpoint)
            .bearer_auth(request.api_key)
            .json(&payload);
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.project {
            builder = builder.header("OpenAI-Project", project);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Completion request failed");
            DomainError::Upstream(format!("completion request failed: {e}"))
        })?;

        let status = response.status();
        debug!(%status, "Completion service responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview = truncate(&body, UPSTREAM_BODY_PREVIEW_CHARS);
            warn!(%status, body = %preview, "Completion service returned an error status");
            return Err(DomainError::Upstream(format!(
                "completion service returned {status}: {preview}"
            )));
        }

        let envelope: ChatCompletionResponse = response.json().await.map_err(|e| {
            DomainError::Upstream(format!("unreadable completion envelope: {e}"))
        })?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                DomainError::MalformedResponse("completion contained no message content".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
