//! Itinerary REST API Route
//!
//! `POST /itinerary` turns a trip request into generated day-by-day text,
//! attaching current weather when available and recording the trip for
//! identified callers.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use voyage_core::{
    day_count_from_json, BudgetTier, Identity, MealPreference, TripRequest, VoyageError,
    WeatherSnapshot,
};
use voyage_planner::ItineraryPlanner;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    telemetry::METRICS,
};

// ============================================================================
// TYPES
// ============================================================================

/// Itinerary request body as sent by clients.
///
/// Everything except `destination` has a default; unrecognized budget and
/// meal labels fall back to `moderate` and `no-preference`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub destination: Option<String>,
    /// Positive integer or numeric string; defaults to 3
    #[cfg_attr(feature = "openapi", schema(value_type = Option<u32>))]
    pub days: Option<Value>,
    /// Free text, or a list of interests joined with commas
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub interests: Option<Value>,
    pub budget: Option<String>,
    pub meal_preference: Option<String>,
    /// Caller identity; enables history personalization and recording
    pub email: Option<String>,
}

impl ItineraryRequest {
    /// Normalize into a domain request. Validation happens in the planner.
    pub fn into_trip_request(self) -> TripRequest {
        let days = day_count_from_json(self.days.as_ref());
        let interests = interests_text(self.interests.as_ref());

        TripRequest::new(self.destination.unwrap_or_default())
            .with_days(days)
            .with_interests(interests)
            .with_budget(BudgetTier::from_optional(self.budget.as_deref()))
            .with_meal_preference(MealPreference::from_optional(self.meal_preference.as_deref()))
            .with_identity(Identity::from_optional(self.email.as_deref()))
    }
}

fn interests_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Generated itinerary. `weather` is `null` when no snapshot was available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItineraryResponse {
    pub success: bool,
    pub itinerary: String,
    pub weather: Option<WeatherSnapshot>,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /itinerary - Generate an itinerary
#[utoipa::path(
    post,
    path = "/itinerary",
    tag = "Trips",
    request_body = ItineraryRequest,
    responses(
        (status = 200, description = "Itinerary generated", body = ItineraryResponse),
        (status = 400, description = "Missing destination", body = ApiError),
        (status = 502, description = "Generation failed", body = ApiError),
    ),
)]
pub async fn create_itinerary(
    State(planner): State<ItineraryPlanner>,
    Json(body): Json<ItineraryRequest>,
) -> ApiResult<Json<ItineraryResponse>> {
    let request = body.into_trip_request();
    let metrics = METRICS.as_ref().ok();

    match planner.generate_itinerary(&request).await {
        Ok(outcome) => {
            if let Some(metrics) = metrics {
                metrics.record_itinerary_generation(true);
                metrics.record_weather_lookup(outcome.weather.is_some());
                metrics.record_history_append(outcome.history.as_str());
            }
            Ok(Json(ItineraryResponse {
                success: true,
                itinerary: outcome.itinerary,
                weather: outcome.weather,
            }))
        }
        Err(VoyageError::Validation(e)) => Err(e.into()),
        Err(e) => {
            tracing::error!(
                error = %e,
                destination = %request.destination(),
                "Itinerary generation failed"
            );
            if let Some(metrics) = metrics {
                metrics.record_itinerary_generation(false);
            }
            Err(e.into())
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new().route("/itinerary", post(create_itinerary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<TripRequest, serde_json::Error> {
        let request: ItineraryRequest = serde_json::from_value(body)?;
        Ok(request.into_trip_request())
    }

    #[test]
    fn test_full_body_maps_to_trip_request() -> Result<(), serde_json::Error> {
        let request = parse(json!({
            "destination": "Paris",
            "days": 5,
            "interests": "art",
            "budget": "luxury",
            "mealPreference": "vegan",
            "email": "a@b.com"
        }))?;

        assert_eq!(request.destination, "Paris");
        assert_eq!(request.days, 5);
        assert_eq!(request.interests, "art");
        assert_eq!(request.budget, BudgetTier::Luxury);
        assert_eq!(request.meal_preference, MealPreference::Vegan);
        assert_eq!(request.identity.as_ref().map(Identity::as_str), Some("a@b.com"));
        Ok(())
    }

    #[test]
    fn test_defaults_apply() -> Result<(), serde_json::Error> {
        let request = parse(json!({
            "destination": "Oslo",
            "days": "zero",
            "budget": "unknown-tier"
        }))?;
        assert_eq!(request.days, 3);
        assert_eq!(request.budget, BudgetTier::Moderate);
        assert_eq!(request.meal_preference, MealPreference::NoPreference);
        assert!(request.identity.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_destination_fails_validation() -> Result<(), serde_json::Error> {
        let request = parse(json!({"days": 2}))?;
        assert!(request.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_interest_list_is_joined() {
        assert_eq!(
            interests_text(Some(&json!(["food", " museums ", "", 3]))),
            "food, museums"
        );
        assert_eq!(interests_text(Some(&json!(null))), "");
        assert_eq!(interests_text(None), "");
    }

    #[test]
    fn test_absent_weather_serializes_as_null() -> Result<(), serde_json::Error> {
        let response = ItineraryResponse {
            success: true,
            itinerary: "Day 1: ...".to_string(),
            weather: None,
        };
        let value = serde_json::to_value(response)?;
        assert_eq!(value["weather"], Value::Null);
        Ok(())
    }
}
