//! Prometheus Metrics Definitions
//!
//! Defines all Voyage metrics with their labels and exposes a /metrics
//! endpoint for Prometheus scraping.

use axum::{http::StatusCode, response::IntoResponse};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

use crate::error::{ApiError, ApiResult};

/// HTTP request latency buckets (seconds)
/// Covers: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s, 30s
///
/// Itinerary requests wait on the generator, so the tail reaches 30s.
const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Global metrics instance - initialized once at first use
pub static METRICS: Lazy<ApiResult<VoyageMetrics>> = Lazy::new(VoyageMetrics::new);

/// Container for all Voyage metrics.
#[derive(Clone)]
pub struct VoyageMetrics {
    /// HTTP request counter - labels: method, path, status
    pub http_requests_total: CounterVec,

    /// HTTP request duration histogram - labels: method, path
    pub http_request_duration_seconds: HistogramVec,

    /// Itinerary generation counter - labels: status (success/error)
    pub itinerary_generations_total: CounterVec,

    /// Suggestion responses - labels: source (generated/fallback)
    pub suggestion_responses_total: CounterVec,

    /// History append outcomes - labels: status (recorded/failed/skipped)
    pub history_appends_total: CounterVec,

    /// Weather enrichment - labels: status (present/absent)
    pub weather_lookups_total: CounterVec,
}

fn registration_error(name: &str, e: prometheus::Error) -> ApiError {
    ApiError::internal_error(format!("Failed to register {}: {}", name, e))
}

impl VoyageMetrics {
    /// Create and register all metrics with Prometheus.
    pub fn new() -> ApiResult<Self> {
        Ok(Self {
            http_requests_total: register_counter_vec!(
                "voyage_http_requests_total",
                "Total number of HTTP requests",
                &["method", "path", "status"]
            )
            .map_err(|e| registration_error("http_requests_total", e))?,

            http_request_duration_seconds: register_histogram_vec!(
                "voyage_http_request_duration_seconds",
                "HTTP request duration in seconds",
                &["method", "path"],
                HTTP_LATENCY_BUCKETS.to_vec()
            )
            .map_err(|e| registration_error("http_request_duration_seconds", e))?,

            itinerary_generations_total: register_counter_vec!(
                "voyage_itinerary_generations_total",
                "Itinerary generation attempts by outcome",
                &["status"]
            )
            .map_err(|e| registration_error("itinerary_generations_total", e))?,

            suggestion_responses_total: register_counter_vec!(
                "voyage_suggestion_responses_total",
                "Suggestion responses by source",
                &["source"]
            )
            .map_err(|e| registration_error("suggestion_responses_total", e))?,

            history_appends_total: register_counter_vec!(
                "voyage_history_appends_total",
                "Trip history appends by outcome",
                &["status"]
            )
            .map_err(|e| registration_error("history_appends_total", e))?,

            weather_lookups_total: register_counter_vec!(
                "voyage_weather_lookups_total",
                "Weather enrichment results for itinerary requests",
                &["status"]
            )
            .map_err(|e| registration_error("weather_lookups_total", e))?,
        })
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, status_str.as_str()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// Record an itinerary generation attempt.
    pub fn record_itinerary_generation(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.itinerary_generations_total
            .with_label_values(&[status])
            .inc();
    }

    /// Record where a suggestion response came from.
    pub fn record_suggestion_response(&self, used_fallback: bool) {
        let source = if used_fallback { "fallback" } else { "generated" };
        self.suggestion_responses_total
            .with_label_values(&[source])
            .inc();
    }

    /// Record a history append outcome.
    pub fn record_history_append(&self, status: &str) {
        self.history_appends_total.with_label_values(&[status]).inc();
    }

    /// Record whether an itinerary carried weather.
    pub fn record_weather_lookup(&self, present: bool) {
        let status = if present { "present" } else { "absent" };
        self.weather_lookups_total.with_label_values(&[status]).inc();
    }
}

/// Handler for GET /metrics endpoint.
///
/// Returns Prometheus text format metrics.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Observability",
    responses(
        (
            status = 200,
            description = "Prometheus metrics in text format",
            content_type = "text/plain"
        ),
        (status = 500, description = "Failed to encode metrics"),
    ),
)]
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                format!("Failed to encode metrics: {}", e).into_bytes(),
            )
        }
    }
}
