//! OpenAPI document for the Voyage API
//!
//! Generated with utoipa from the route annotations and response types.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{
    account::{self, LoginRequest, MessageResponse, StatsResponse},
    health::{self, ComponentHealth, HealthDetails, HealthResponse, HealthStatus},
    itinerary::{self, ItineraryRequest, ItineraryResponse},
    suggestions::{self, SuggestionsRequest, SuggestionsResponse},
    BannerResponse,
};
use crate::telemetry::metrics;

use voyage_core::{BudgetTier, SuggestionRecord, TripHistoryEntry, UserStats, WeatherSnapshot};

/// OpenAPI document for the Voyage API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Voyage API",
        version = "0.1.0",
        description = "Travel itinerary generation, destination suggestions and traveler accounts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local Development")
    ),
    tags(
        (name = "Trips", description = "Itinerary generation and destination suggestions"),
        (name = "Accounts", description = "Signup, login, profiles and trip statistics"),
        (name = "Health", description = "Liveness and readiness checks"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        crate::routes::root,
        itinerary::create_itinerary,
        suggestions::suggested_trips,
        account::signup,
        account::login,
        account::get_user,
        account::update_user,
        account::user_stats,
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(
        schemas(
            // === Error Types ===
            ApiError, ErrorCode,

            // === Trips ===
            ItineraryRequest, ItineraryResponse, WeatherSnapshot,
            SuggestionsRequest, SuggestionsResponse, SuggestionRecord,

            // === Accounts ===
            LoginRequest, MessageResponse, StatsResponse, UserStats, TripHistoryEntry, BudgetTier,

            // === Health ===
            BannerResponse, HealthResponse, HealthStatus, HealthDetails, ComponentHealth,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Render the OpenAPI document as a JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }
}
