//! Voyage LLM - Generative Text Layer
//!
//! Provider-agnostic trait for text generation, the [`GenerationClient`]
//! wrapper every caller goes through, and a scripted mock provider.
//!
//! Callers never talk to a provider directly. `GenerationClient` owns the
//! timeout today and is the single seam where a retry/backoff policy would
//! be added.

pub mod providers;

pub use providers::{GeminiClient, GeminiGenerationProvider};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use voyage_core::{GenerationConfig, GenerationError};

// ============================================================================
// GENERATION PROVIDER TRAIT
// ============================================================================

/// Trait for generative-text providers.
/// Implementations must be thread-safe (Send + Sync).
///
/// # Example
/// ```ignore
/// struct MyProvider { /* ... */ }
///
/// #[async_trait]
/// impl GenerationProvider for MyProvider {
///     async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
///         // Call the provider API
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short provider name used in logs and errors.
    fn provider_id(&self) -> &str;

    /// Model identifier sent with each request.
    fn model_id(&self) -> &str;

    /// Generate text for a single prompt.
    ///
    /// # Arguments
    /// * `prompt` - Complete natural-language request
    ///
    /// # Returns
    /// * `Ok(String)` - Raw generated text, untrimmed
    /// * `Err(GenerationError)` - If the call fails or returns no text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ============================================================================
// GENERATION CLIENT
// ============================================================================

/// One generation call per request, bounded by a timeout.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn GenerationProvider>,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn GenerationProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(provider: Arc<dyn GenerationProvider>, config: &GenerationConfig) -> Self {
        Self::new(provider, config.timeout)
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Generate text for `prompt`. A timeout surfaces as [`GenerationError::Timeout`].
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let start = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.provider.generate(prompt))
            .await
            .map_err(|_| GenerationError::Timeout {
                provider: self.provider.provider_id().to_string(),
                after_ms: self.timeout.as_millis() as u64,
            })
            .and_then(|inner| inner);

        match &result {
            Ok(text) => tracing::debug!(
                provider = self.provider.provider_id(),
                model = self.provider.model_id(),
                prompt_chars = prompt.len(),
                output_chars = text.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Generation completed"
            ),
            Err(e) => tracing::warn!(
                provider = self.provider.provider_id(),
                model = self.provider.model_id(),
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "Generation failed"
            ),
        }

        result
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("provider", &self.provider.provider_id())
            .field("model", &self.provider.model_id())
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// MOCK PROVIDER
// ============================================================================

/// Mock generation provider for testing.
///
/// Replies follow a script; once the script is exhausted the last reply
/// repeats. Every prompt is recorded.
#[derive(Debug, Clone)]
pub struct MockGenerationProvider {
    script: Arc<Mutex<Vec<Result<String, GenerationError>>>>,
    last: Arc<Mutex<Result<String, GenerationError>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockGenerationProvider {
    /// Create a mock that answers every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(text.into())])
    }

    /// Create a mock whose every call fails with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Create a mock that plays back `replies` in order.
    pub fn scripted(replies: Vec<Result<String, GenerationError>>) -> Self {
        let mut script = replies;
        script.reverse();
        let last = script
            .first()
            .cloned()
            .unwrap_or(Err(GenerationError::ProviderNotConfigured));
        Self {
            script: Arc::new(Mutex::new(script)),
            last: Arc::new(Mutex::new(last)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep before answering, to exercise generation timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    fn provider_id(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().await.pop();
        match next {
            Some(reply) => {
                *self.last.lock().await = reply.clone();
                reply
            }
            None => self.last.lock().await.clone(),
        }
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
