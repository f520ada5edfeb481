//! Suggested Trips REST API Route
//!
//! `POST /suggested-trips` never fails on generation: malformed or missing
//! model output is replaced by the default list and flagged with a note.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use voyage_core::{Identity, SuggestionRecord};
use voyage_planner::{ItineraryPlanner, FALLBACK_NOTE};

use crate::{state::AppState, telemetry::METRICS};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SuggestionsRequest {
    /// Caller identity; personalizes suggestions from trip history
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SuggestionsResponse {
    pub success: bool,
    pub trips: Vec<SuggestionRecord>,
    /// Present only when the default list is served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /suggested-trips - Recommend destinations
#[utoipa::path(
    post,
    path = "/suggested-trips",
    tag = "Trips",
    request_body = SuggestionsRequest,
    responses(
        (
            status = 200,
            description = "Generated or default suggestions",
            body = SuggestionsResponse
        ),
    ),
)]
pub async fn suggested_trips(
    State(planner): State<ItineraryPlanner>,
    body: Option<Json<SuggestionsRequest>>,
) -> Json<SuggestionsResponse> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let identity = Identity::from_optional(body.email.as_deref());

    let list = planner.generate_suggestions(identity.as_ref()).await;

    if let Ok(metrics) = METRICS.as_ref() {
        metrics.record_suggestion_response(list.used_fallback);
    }

    Json(SuggestionsResponse {
        success: true,
        note: list.used_fallback.then(|| FALLBACK_NOTE.to_string()),
        trips: list.trips,
    })
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new().route("/suggested-trips", post(suggested_trips))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_omitted_for_generated_list() -> Result<(), serde_json::Error> {
        let response = SuggestionsResponse {
            success: true,
            trips: Vec::new(),
            note: None,
        };
        let value = serde_json::to_value(response)?;
        assert_eq!(value, json!({"success": true, "trips": []}));
        Ok(())
    }

    #[test]
    fn test_request_email_optional() -> Result<(), serde_json::Error> {
        let request: SuggestionsRequest = serde_json::from_value(json!({}))?;
        assert!(request.email.is_none());
        Ok(())
    }
}
