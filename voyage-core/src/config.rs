//! Configuration types for the outbound providers.
//!
//! Values are loaded once at startup and treated as immutable afterwards.

use std::time::Duration;

/// Upper bound on a single weather lookup.
pub const MAX_WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Generative-text request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output-length cap in tokens
    pub max_output_tokens: u32,
    /// Timeout for one generation call
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
            temperature: 0.7,
            max_output_tokens: 8192,
            timeout: Duration::from_secs(60),
        }
    }
}

impl GenerationConfig {
    /// Create a generation configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VOYAGE_GEMINI_MODEL`: model id (default: gemini-2.0-flash-exp)
    /// - `VOYAGE_GENERATION_TEMPERATURE`: sampling temperature (default: 0.7)
    /// - `VOYAGE_GENERATION_MAX_TOKENS`: output cap (default: 8192)
    /// - `VOYAGE_GENERATION_TIMEOUT_SECS`: call timeout (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("VOYAGE_GEMINI_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.model),
            temperature: std::env::var("VOYAGE_GENERATION_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.temperature),
            max_output_tokens: std::env::var("VOYAGE_GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_output_tokens),
            timeout: std::env::var("VOYAGE_GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| parse_timeout_secs(&s))
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Weather provider parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org".to_string(),
            timeout: MAX_WEATHER_TIMEOUT,
        }
    }
}

impl WeatherConfig {
    /// Create a weather configuration from environment variables.
    ///
    /// - `VOYAGE_WEATHER_BASE_URL` (default: http://api.openweathermap.org)
    /// - `VOYAGE_WEATHER_TIMEOUT_SECS` (default and maximum: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("VOYAGE_WEATHER_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: std::env::var("VOYAGE_WEATHER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| parse_timeout_secs(&s))
                .unwrap_or(defaults.timeout),
        }
    }

    /// Timeout actually applied to a lookup, clamped to [`MAX_WEATHER_TIMEOUT`].
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.min(MAX_WEATHER_TIMEOUT)
    }
}

/// Whole seconds, strictly positive. Zero would time out every call.
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash-exp");
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_weather_timeout_is_clamped() {
        let config = WeatherConfig {
            timeout: Duration::from_secs(30),
            ..Default::default()
        };
        assert_eq!(config.effective_timeout(), MAX_WEATHER_TIMEOUT);

        let config = WeatherConfig {
            timeout: Duration::from_millis(750),
            ..Default::default()
        };
        assert_eq!(config.effective_timeout(), Duration::from_millis(750));
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("12"), Some(Duration::from_secs(12)));
        assert_eq!(parse_timeout_secs(" 3 "), Some(Duration::from_secs(3)));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("-1"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
    }

    #[test]
    fn test_zero_timeouts_from_env_keep_defaults() {
        std::env::set_var("VOYAGE_GENERATION_TIMEOUT_SECS", "0");
        std::env::set_var("VOYAGE_WEATHER_TIMEOUT_SECS", "0");

        let generation = GenerationConfig::from_env();
        let weather = WeatherConfig::from_env();

        std::env::remove_var("VOYAGE_GENERATION_TIMEOUT_SECS");
        std::env::remove_var("VOYAGE_WEATHER_TIMEOUT_SECS");

        assert_eq!(generation.timeout, GenerationConfig::default().timeout);
        assert_eq!(weather.timeout, WeatherConfig::default().timeout);
    }
}
