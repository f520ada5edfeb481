//! Voyage Weather - best-effort destination weather
//!
//! A [`WeatherProvider`] performs one outbound lookup and reports failures
//! as [`WeatherError`]. [`WeatherLookup`] wraps a provider with a bounded
//! timeout and collapses every failure into an absent snapshot, so weather
//! never blocks an itinerary.

pub mod openweather;

pub use openweather::OpenWeatherProvider;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use voyage_core::{WeatherError, WeatherReading, WeatherSnapshot, MAX_WEATHER_TIMEOUT};

// ============================================================================
// WEATHER PROVIDER TRAIT
// ============================================================================

/// Trait for current-weather providers.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short provider name used in logs.
    fn provider_id(&self) -> &str;

    /// Fetch current conditions for a destination.
    ///
    /// # Arguments
    /// * `destination` - Free-text place name, e.g. "Paris"
    ///
    /// # Returns
    /// * `Ok(WeatherReading)` - Raw provider values
    /// * `Err(WeatherError)` - Transport failure, non-success status or malformed payload
    async fn current(&self, destination: &str) -> Result<WeatherReading, WeatherError>;
}

// ============================================================================
// WEATHER LOOKUP
// ============================================================================

/// Timeout-bounded, error-absorbing weather lookup.
#[derive(Clone)]
pub struct WeatherLookup {
    provider: Option<Arc<dyn WeatherProvider>>,
    timeout: Duration,
}

impl WeatherLookup {
    /// Wrap a provider. Timeouts above [`MAX_WEATHER_TIMEOUT`] are clamped.
    pub fn new(provider: Arc<dyn WeatherProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout: timeout.min(MAX_WEATHER_TIMEOUT),
        }
    }

    /// A lookup that always reports no weather (no provider configured).
    pub fn disabled() -> Self {
        Self {
            provider: None,
            timeout: MAX_WEATHER_TIMEOUT,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and normalize, surfacing the failure reason.
    pub async fn try_fetch(&self, destination: &str) -> Result<WeatherSnapshot, WeatherError> {
        let provider = self.provider.as_ref().ok_or(WeatherError::NotConfigured)?;

        let reading = tokio::time::timeout(self.timeout, provider.current(destination))
            .await
            .map_err(|_| WeatherError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            })??;

        Ok(WeatherSnapshot::from_reading(&reading))
    }

    /// Fetch and normalize; any failure is logged and yields `None`.
    pub async fn fetch(&self, destination: &str) -> Option<WeatherSnapshot> {
        match self.try_fetch(destination).await {
            Ok(snapshot) => Some(snapshot),
            Err(WeatherError::NotConfigured) => {
                tracing::debug!(destination, "Weather lookup skipped, no provider configured");
                None
            }
            Err(e) => {
                tracing::warn!(destination, error = %e, "Weather lookup failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for WeatherLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherLookup")
            .field("provider", &self.provider.as_ref().map(|p| p.provider_id().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// STATIC PROVIDER
// ============================================================================

/// Provider that answers every lookup with the same reading or error.
/// Used by tests and local development.
#[derive(Debug, Clone)]
pub struct StaticWeatherProvider {
    outcome: Result<WeatherReading, WeatherError>,
    delay: Option<Duration>,
}

impl StaticWeatherProvider {
    pub fn reading(reading: WeatherReading) -> Self {
        Self {
            outcome: Ok(reading),
            delay: None,
        }
    }

    pub fn failing(error: WeatherError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
        }
    }

    /// Sleep before answering, to exercise lookup timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    fn provider_id(&self) -> &str {
        "static"
    }

    async fn current(&self, _destination: &str) -> Result<WeatherReading, WeatherError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
