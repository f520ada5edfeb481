//! Generative-text provider implementations
//!
//! Concrete implementations of [`crate::GenerationProvider`].

pub mod gemini;

pub use gemini::{GeminiClient, GeminiGenerationProvider};

use voyage_core::GenerationError;

pub(crate) fn request_failed(
    provider: &str,
    status: i32,
    message: impl Into<String>,
) -> GenerationError {
    GenerationError::RequestFailed {
        provider: provider.to_string(),
        status,
        message: message.into(),
    }
}

pub(crate) fn invalid_response(provider: &str, reason: impl Into<String>) -> GenerationError {
    GenerationError::InvalidResponse {
        provider: provider.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn rate_limited(provider: &str, retry_after_ms: i64) -> GenerationError {
    GenerationError::RateLimited {
        provider: provider.to_string(),
        retry_after_ms,
    }
}
