//! Gemini text generation provider

use super::client::{GeminiClient, PROVIDER};
use super::types::{GenerateContentRequest, GenerateContentResponse, GenerationParameters};
use crate::providers::invalid_response;
use crate::GenerationProvider;
use async_trait::async_trait;
use voyage_core::{GenerationConfig, GenerationError};

/// Gemini provider for single-prompt text generation.
pub struct GeminiGenerationProvider {
    client: GeminiClient,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiGenerationProvider {
    /// Create a new Gemini generation provider.
    ///
    /// # Arguments
    /// * `client` - Configured Gemini HTTP client
    /// * `config` - Model id, temperature and output cap
    pub fn new(client: GeminiClient, config: &GenerationConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiGenerationProvider {
    fn provider_id(&self) -> &str {
        PROVIDER
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::user_prompt(
            prompt,
            GenerationParameters {
                temperature: Some(self.temperature),
                max_output_tokens: Some(self.max_output_tokens),
            },
        );

        let endpoint = format!("models/{}:generateContent", self.model);
        let response: GenerateContentResponse = self.client.request(&endpoint, &request).await?;

        if let Some(text) = response.first_text() {
            return Ok(text);
        }

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(invalid_response(PROVIDER, format!("Prompt blocked: {}", reason)));
        }

        Err(GenerationError::EmptyCompletion {
            provider: PROVIDER.to_string(),
        })
    }
}

impl std::fmt::Debug for GeminiGenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerationProvider")
            .field("client", &self.client)
            .field("model", &self.model)
            .finish()
    }
}
