//! Axum middleware for HTTP request tracing and metrics.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info_span, Instrument};

use super::metrics::METRICS;

/// Normalize path for metrics/spans (replace emails and numeric IDs with placeholders).
///
/// Keeps Prometheus label cardinality bounded: `/user/stats/a@b.com` and
/// `/user/stats/c@d.com` share one series.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.contains('@') || segment.contains("%40") {
                "{email}"
            } else if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Observability middleware for Axum.
///
/// Wraps every request in a tracing span, records Prometheus metrics and
/// logs completion.
pub async fn observability_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let normalized_path = normalize_path(&path);

    let span = info_span!(
        "http_request",
        http.method = %method,
        http.route = %normalized_path,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    let status = response.status();

    match METRICS.as_ref() {
        Ok(metrics) => metrics.record_http_request(
            method.as_str(),
            &normalized_path,
            status.as_u16(),
            duration.as_secs_f64(),
        ),
        Err(e) => tracing::warn!(error = %e, "Metrics unavailable"),
    }

    // Raw paths carry email addresses; only the normalized route is logged.
    tracing::info!(
        method = %method,
        path = %normalized_path,
        status = status.as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}
