// src/application/generator.rs
use crate::application::validator::parse_flashcards;
use crate::application::{CompletionClient, CompletionRequest, PromptTemplate};
use crate::constants::DEFAULT_MODEL;
use crate::domain::{CardColors, DomainError, FlashcardRequest, GenerationResult};
use tracing::{debug, info, instrument, warn};

/// Per-deployment settings the generator needs for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl GenerationSettings {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::new(None, DEFAULT_MODEL)
    }
}

/// Turns one prompt into one set of flashcards through the completion service.
///
/// Holds no per-call state, so a single instance can serve concurrent requests.
pub struct FlashcardGenerator<C: CompletionClient> {
    client: C,
    settings: GenerationSettings,
    template: PromptTemplate,
}

impl<C: CompletionClient> FlashcardGenerator<C> {
    pub fn new(client: C, settings: GenerationSettings) -> Self {
        Self::with_template(client, settings, PromptTemplate::default())
    }

    pub fn with_template(client: C, settings: GenerationSettings, template: PromptTemplate) -> Self {
        Self {
            client,
            settings,
            template,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate flashcards for `request`.
    ///
    /// Configuration and input are checked before the single upstream call.
    /// Nothing is retried and no partial result is ever returned.
    #[instrument(level = "debug", skip(self, request), fields(model = %self.settings.model))]
    pub async fn generate(&self, request: &FlashcardRequest) -> Result<GenerationResult, DomainError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                warn!("Completion service credential is not configured");
                DomainError::Configuration("completion service API key is not set".to_string())
            })?;

        if request.prompt.trim().is_empty() {
            return Err(DomainError::Validation("prompt must not be empty".to_string()));
        }

        let colors = CardColors::resolve(request.front_color.as_deref(), request.back_color.as_deref())?;

        let (system_prompt, user_prompt) = self.template.build(&request.prompt);
        let completion = CompletionRequest {
            api_key,
            model: &self.settings.model,
            system_prompt,
            user_prompt,
            json_mode: true,
        };

        let content = self.client.complete(&completion).await?;

        let result = parse_flashcards(&content, &colors).inspect_err(|e| {
            debug!(error = %e, content = %content, "Rejected completion content");
        })?;

        info!(cards = result.len(), "Generated flashcards");
        Ok(result)
    }
}
