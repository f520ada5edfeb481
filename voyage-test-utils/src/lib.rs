//! Voyage Test Utilities
//!
//! Shared test infrastructure for the Voyage workspace:
//! - Proptest generators for request labels and destinations
//! - Fixtures for the common itinerary scenarios
//! - Re-exports of the mock providers and the in-memory store

pub use voyage_llm::MockGenerationProvider;
pub use voyage_storage::InMemoryStore;
pub use voyage_weather::StaticWeatherProvider;

pub use voyage_core::{
    BudgetTier, Identity, MealPreference, NewUser, Timestamp, TripHistoryEntry, TripRequest,
    WeatherError, WeatherReading, WeatherSnapshot,
};

use std::sync::Arc;
use std::time::Duration;

use voyage_llm::GenerationClient;
use voyage_weather::WeatherLookup;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for request inputs.

    use proptest::prelude::*;

    /// Budget labels as clients send them: known tiers in any case, plus noise.
    pub fn arb_budget_label() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec!["budget", "moderate", "luxury", "Luxury", " BUDGET "])
                .prop_map(str::to_string),
            "[a-z-]{0,12}",
        ]
    }

    /// Meal-preference labels: the four known values plus noise.
    pub fn arb_meal_label() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec![
                "vegetarian",
                "non-vegetarian",
                "vegan",
                "no-preference",
                "Vegan",
            ])
            .prop_map(str::to_string),
            "[a-z-]{0,14}",
        ]
    }

    /// Non-blank destination names.
    pub fn arb_destination() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,10})?"
    }

    /// Day counts in the range a client would plausibly ask for.
    pub fn arb_day_count() -> impl Strategy<Value = u32> {
        1u32..=21
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common itinerary scenarios.

    use super::*;
    use chrono::{TimeZone, Utc};

    pub const PARIS_EMAIL: &str = "a@b.com";

    /// Paris, 5 days, interested in art, for `a@b.com`.
    pub fn paris_request() -> TripRequest {
        TripRequest::new("Paris")
            .with_days(5)
            .with_interests("art")
            .with_identity(Identity::parse(PARIS_EMAIL))
    }

    /// Clear skies, 18°C, 60% humidity, wind 5 m/s (18 km/h once normalized).
    pub fn clear_weather_reading() -> WeatherReading {
        WeatherReading {
            temperature_c: 18.2,
            humidity_pct: 60.0,
            condition: "Clear".to_string(),
            wind_speed_ms: 5.0,
        }
    }

    /// A stored trip created `offset_minutes` after a fixed epoch, so
    /// entries built with increasing offsets sort in creation order.
    pub fn history_entry(destination: &str, days: u32, offset_minutes: i64) -> TripHistoryEntry {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        TripHistoryEntry {
            destination: destination.to_string(),
            days,
            interests: "food".to_string(),
            budget: BudgetTier::Moderate,
            itinerary: format!("Day 1: arrive in {}", destination),
            created_at: base + chrono::Duration::minutes(offset_minutes),
        }
    }

    /// An account with an empty profile. The credential is opaque to stores.
    pub fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            credential: "test-credential".to_string(),
            profile: serde_json::Map::new(),
            created_at: Utc::now(),
        }
    }

    /// Weather lookup answering every destination with `reading`.
    pub fn static_weather(reading: WeatherReading) -> WeatherLookup {
        WeatherLookup::new(
            Arc::new(StaticWeatherProvider::reading(reading)),
            Duration::from_secs(5),
        )
    }

    /// Weather lookup whose provider answers every request with HTTP `status`.
    pub fn failing_weather(status: u16) -> WeatherLookup {
        WeatherLookup::new(
            Arc::new(StaticWeatherProvider::failing(WeatherError::RequestFailed {
                status,
                message: "internal error".to_string(),
            })),
            Duration::from_secs(1),
        )
    }

    /// Generation client over a mock provider with a short timeout.
    pub fn mock_generator(provider: MockGenerationProvider) -> GenerationClient {
        GenerationClient::new(Arc::new(provider), Duration::from_secs(2))
    }
}


#[cfg(test)]
mod prop_tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_any_budget_label_resolves(label in arb_budget_label()) {
            let tier = BudgetTier::from_label(&label);
            prop_assert!(matches!(
                tier,
                BudgetTier::Budget | BudgetTier::Moderate | BudgetTier::Luxury
            ));
        }

        #[test]
        fn prop_meal_label_resolves_to_its_own_label_or_default(label in arb_meal_label()) {
            let meal = MealPreference::from_label(&label);
            let normalized = label.trim().to_ascii_lowercase();
            prop_assert!(meal.as_str() == normalized || meal == MealPreference::NoPreference);
            prop_assert!(!meal.description().is_empty());
        }

        #[test]
        fn prop_generated_destinations_validate(
            destination in arb_destination(),
            days in arb_day_count(),
        ) {
            let request = TripRequest::new(destination).with_days(days);
            prop_assert!(request.validate().is_ok());
            prop_assert_eq!(request.days, days);
        }
    }
}
