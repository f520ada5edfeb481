//! REST API Routes Module
//!
//! Route handlers grouped by concern:
//! - Trips: itinerary generation and suggested destinations
//! - Accounts: signup, login, profiles, trip statistics
//! - Health check endpoints (Kubernetes-compatible)
//! - Metrics and the OpenAPI document
//! - CORS support for the browser frontend

pub mod account;
pub mod health;
pub mod itinerary;
pub mod suggestions;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware};

pub use account::create_router as account_router;
pub use health::create_router as health_router;
pub use itinerary::create_router as itinerary_router;
pub use suggestions::create_router as suggestions_router;

const BANNER: &str = "VoyageVista Backend is running 🚀";

/// Service banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BannerResponse {
    pub message: String,
}

/// GET / - Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = BannerResponse),
    ),
)]
pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: BANNER.to_string(),
    })
}

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// CORS
// ============================================================================

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if !config.is_production() {
        tracing::info!("CORS: Development mode - allowing all origins");
        return cors.allow_origin(Any).allow_headers(Any);
    }

    tracing::info!(
        "CORS: Production mode - allowing origins: {:?}",
        config.cors_origins
    );
    let allowed = config.clone();
    let cors = cors
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|origin| allowed.is_origin_allowed(origin))
                .unwrap_or(false)
        }));

    if config.cors_allow_credentials {
        cors.allow_credentials(true)
    } else {
        cors
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Trips: `POST /itinerary`, `POST /suggested-trips`
/// - Accounts: `/signup`, `/login`, `/user/*`, `/user-stats/*`
/// - Health checks at `/health/*`
/// - Metrics at `/metrics`
/// - OpenAPI document at `/openapi.json`
pub fn create_api_router(state: AppState, api_config: &ApiConfig) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .merge(itinerary::create_router())
        .merge(suggestions::create_router())
        .merge(account::create_router())
        .nest("/health", health::create_router())
        .route("/metrics", get(metrics_handler))
        .route("/openapi.json", get(openapi_json))
        .with_state(state);

    let cors = build_cors_layer(api_config);

    router
        .layer(from_fn(observability_middleware))
        .layer(cors)
}
