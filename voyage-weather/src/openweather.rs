//! OpenWeatherMap current-weather client

use crate::WeatherProvider;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use voyage_core::{WeatherConfig, WeatherError, WeatherReading};

const PROVIDER: &str = "openweathermap";

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Clone, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ConditionBlock {
    main: String,
}

#[derive(Debug, Clone, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CurrentWeatherResponse {
    fn into_reading(self) -> Result<WeatherReading, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.main)
            .ok_or_else(|| WeatherError::MalformedPayload {
                reason: "weather condition list is empty".to_string(),
            })?;

        Ok(WeatherReading {
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity,
            condition,
            wind_speed_ms: self.wind.speed,
        })
    }
}

// ============================================================================
// CLIENT
// ============================================================================

/// OpenWeatherMap `data/2.5/weather` client using metric units.
pub struct OpenWeatherProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenWeatherProvider {
    /// Create a new OpenWeatherMap provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenWeatherMap API key
    /// * `config` - Base URL and timeout
    pub fn new(api_key: impl Into<String>, config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.effective_timeout())
            .build()
            .map_err(|e| WeatherError::Transport {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        let api_key: String = api_key.into();
        Ok(Self {
            client,
            api_key: SecretString::new(api_key.into_boxed_str()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn provider_id(&self) -> &str {
        PROVIDER
    }

    async fn current(&self, destination: &str) -> Result<WeatherReading, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", destination),
                ("appid", self.api_key.expose_secret()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Transport {
                reason: format!("HTTP request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.message)
                .unwrap_or(error_text);
            return Err(WeatherError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let body: CurrentWeatherResponse =
            response.json().await.map_err(|e| WeatherError::MalformedPayload {
                reason: format!("Failed to parse response: {}", e),
            })?;

        body.into_reading()
    }
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherLookup;
    use axum::{
        extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use voyage_core::WeatherSnapshot;

    async fn serve(router: Router) -> Result<String, String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| e.to_string())?;
        let addr = listener.local_addr().map_err(|e| e.to_string())?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(format!("http://{}", addr))
    }

    fn provider(base_url: String) -> Result<OpenWeatherProvider, String> {
        let config = WeatherConfig {
            base_url,
            timeout: Duration::from_secs(2),
        };
        OpenWeatherProvider::new("test-key", &config).map_err(|e| e.to_string())
    }

    async fn paris_weather(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        if params.get("q").map(String::as_str) != Some("Paris")
            || params.get("appid").map(String::as_str) != Some("test-key")
            || params.get("units").map(String::as_str) != Some("metric")
        {
            return (StatusCode::BAD_REQUEST, Json(serde_json::json!({"message": "bad query"})));
        }
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "main": {"temp": 18.2, "humidity": 60},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 5.0}
            })),
        )
    }

    #[tokio::test]
    async fn test_success_maps_fields() -> Result<(), String> {
        let base = serve(Router::new().route("/data/2.5/weather", get(paris_weather))).await?;
        let reading = provider(base)?.current("Paris").await.map_err(|e| e.to_string())?;
        assert_eq!(reading.condition, "Clear");
        assert_eq!(reading.humidity_pct, 60.0);
        assert_eq!(WeatherSnapshot::from_reading(&reading).wind_speed, 18);
        Ok(())
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() -> Result<(), String> {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"cod": 500, "message": "internal error"})),
                )
            }),
        );
        let base = serve(router).await?;
        let result = provider(base)?.current("Paris").await;
        assert_eq!(
            result,
            Err(WeatherError::RequestFailed {
                status: 500,
                message: "internal error".to_string()
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_are_malformed() -> Result<(), String> {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async { Json(serde_json::json!({"main": {"temp": 10.0}})) }),
        );
        let base = serve(router).await?;
        let result = provider(base)?.current("Paris").await;
        assert!(matches!(result, Err(WeatherError::MalformedPayload { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_server_500_through_lookup_is_absent() -> Result<(), String> {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await?;
        let lookup = WeatherLookup::new(Arc::new(provider(base)?), Duration::from_secs(2));
        assert_eq!(lookup.fetch("Paris").await, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_slow_server_through_lookup_is_absent() -> Result<(), String> {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                StatusCode::OK
            }),
        );
        let base = serve(router).await?;
        let lookup = WeatherLookup::new(Arc::new(provider(base)?), Duration::from_millis(100));
        assert_eq!(lookup.fetch("Paris").await, None);
        Ok(())
    }

    #[test]
    fn test_debug_redacts_key() -> Result<(), String> {
        let provider = provider("http://localhost".to_string())?;
        let debug = format!("{:?}", provider);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-key"));
        Ok(())
    }
}
