//! Error types for Voyage operations

use thiserror::Error;

/// Trip input validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },
}

/// Weather provider errors.
///
/// These never reach a caller of the itinerary flow; they are logged and
/// collapse into an absent weather snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Weather provider not configured")]
    NotConfigured,

    #[error("Weather request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Weather transport error: {reason}")]
    Transport { reason: String },

    #[error("Malformed weather payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Weather lookup timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// Generative-text provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("No generation provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid API key for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("{provider} returned no text")]
    EmptyCompletion { provider: String },

    #[error("Request to {provider} timed out after {after_ms}ms")]
    Timeout { provider: String, after_ms: u64 },
}

/// Structured-output interpretation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterpretationError {
    #[error("Generator output was empty")]
    EmptyOutput,

    #[error("Generator output is not a suggestion list: {reason}")]
    Malformed { reason: String },

    #[error("Generator returned an empty suggestion list")]
    NoSuggestions,
}

/// Persistence errors for users and trip history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User not found: {email}")]
    NotFound { email: String },

    #[error("User already exists: {email}")]
    AlreadyExists { email: String },

    #[error("Storage operation {operation} failed: {reason}")]
    QueryFailed { operation: String, reason: String },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Stored record could not be decoded: {reason}")]
    Corrupt { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Voyage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoyageError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Interpretation error: {0}")]
    Interpretation(#[from] InterpretationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for Voyage operations.
pub type VoyageResult<T> = Result<T, VoyageError>;

// =============================================================================
// TESTS
// =============================================================================
