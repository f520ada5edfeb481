//! Google Gemini provider implementation
//!
//! Text generation through the `generateContent` endpoint.

pub mod client;
pub mod generation;
pub mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use generation::GeminiGenerationProvider;
