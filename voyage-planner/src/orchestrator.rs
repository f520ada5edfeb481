//! Itinerary and suggestion orchestration
//!
//! [`ItineraryPlanner`] sequences weather lookup, history reads, prompt
//! composition, generation, interpretation and the history append. It holds
//! only injected handles and no per-request state, so one planner is shared
//! by every request.

use crate::interpret::{interpret_itinerary, interpret_suggestions, SuggestionList};
use crate::prompt::{compose_itinerary_prompt, compose_suggestions_prompt};
use std::sync::Arc;
use voyage_core::{Identity, TripHistoryEntry, TripRequest, VoyageResult, WeatherSnapshot};
use voyage_llm::GenerationClient;
use voyage_storage::HistoryStore;
use voyage_weather::WeatherLookup;

/// Most recent trips consulted when composing an itinerary prompt.
pub const ITINERARY_HISTORY_LIMIT: usize = 3;

/// What happened to the history append after a successful generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWrite {
    /// No identity was supplied.
    Skipped,
    Recorded,
    /// The append failed; the itinerary is still returned.
    Failed,
}

impl HistoryWrite {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryWrite::Skipped => "skipped",
            HistoryWrite::Recorded => "recorded",
            HistoryWrite::Failed => "failed",
        }
    }
}

/// Result of a successful itinerary generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryOutcome {
    pub itinerary: String,
    pub weather: Option<WeatherSnapshot>,
    pub history: HistoryWrite,
}

/// Orchestrates the two request flows over injected collaborators.
#[derive(Clone)]
pub struct ItineraryPlanner {
    weather: WeatherLookup,
    generator: GenerationClient,
    history: Arc<dyn HistoryStore>,
}

impl ItineraryPlanner {
    pub fn new(
        weather: WeatherLookup,
        generator: GenerationClient,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            weather,
            generator,
            history,
        }
    }

    /// Generate an itinerary for `request`.
    ///
    /// Fails only on validation or generation errors. Weather and the history
    /// append are best-effort; the append happens strictly after a successful
    /// generation.
    pub async fn generate_itinerary(
        &self,
        request: &TripRequest,
    ) -> VoyageResult<ItineraryOutcome> {
        request.validate()?;
        let destination = request.destination();

        let (weather, history) = tokio::join!(
            self.weather.fetch(destination),
            self.read_history(request.identity.as_ref(), Some(ITINERARY_HISTORY_LIMIT)),
        );

        let prompt = compose_itinerary_prompt(request, weather.as_ref(), &history);
        let raw = self.generator.generate(&prompt).await?;
        let itinerary = interpret_itinerary(&raw);

        let history = match &request.identity {
            Some(identity) => {
                let entry = request.history_entry(itinerary.clone(), chrono::Utc::now());
                self.record_trip(identity, &entry).await
            }
            None => HistoryWrite::Skipped,
        };

        tracing::info!(
            destination = %destination,
            days = request.days,
            weather = weather.is_some(),
            history = history.as_str(),
            "Itinerary generated"
        );

        Ok(ItineraryOutcome {
            itinerary,
            weather,
            history,
        })
    }

    /// Generate destination suggestions. Never fails: generation and
    /// interpretation errors yield the default list.
    pub async fn generate_suggestions(&self, identity: Option<&Identity>) -> SuggestionList {
        let history = self.read_history(identity, None).await;
        let prompt = compose_suggestions_prompt(&history);

        match self.generator.generate(&prompt).await {
            Ok(raw) => interpret_suggestions(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion generation failed, serving defaults");
                SuggestionList::fallback()
            }
        }
    }

    async fn read_history(
        &self,
        identity: Option<&Identity>,
        limit: Option<usize>,
    ) -> Vec<TripHistoryEntry> {
        let Some(identity) = identity else {
            return Vec::new();
        };
        match self.history.recent_trips(identity.as_str(), limit).await {
            Ok(trips) => trips,
            Err(e) => {
                tracing::warn!(
                    identity = %identity,
                    error = %e,
                    "History read failed, continuing without history"
                );
                Vec::new()
            }
        }
    }

    async fn record_trip(&self, identity: &Identity, entry: &TripHistoryEntry) -> HistoryWrite {
        match self.history.append_trip(identity.as_str(), entry).await {
            Ok(()) => HistoryWrite::Recorded,
            Err(e) => {
                tracing::error!(
                    identity = %identity,
                    destination = %entry.destination,
                    error = %e,
                    "Failed to append trip history"
                );
                HistoryWrite::Failed
            }
        }
    }
}

impl std::fmt::Debug for ItineraryPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryPlanner")
            .field("weather", &self.weather)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_suggestions;
    use async_trait::async_trait;
    use std::time::Duration;
    use voyage_core::{BudgetTier, GenerationError, StorageError, ValidationError, VoyageError};
    use voyage_llm::MockGenerationProvider;
    use voyage_storage::{InMemoryStore, UserStore};
    use voyage_test_utils::fixtures::{
        clear_weather_reading, failing_weather, history_entry, mock_generator, new_user,
        paris_request, static_weather, PARIS_EMAIL,
    };
    use voyage_weather::StaticWeatherProvider;

    async fn store_with_user() -> Result<InMemoryStore, StorageError> {
        let store = InMemoryStore::new();
        store.user_insert(new_user(PARIS_EMAIL)).await?;
        Ok(store)
    }

    fn build_planner(
        weather: WeatherLookup,
        mock: &MockGenerationProvider,
        history: impl HistoryStore + 'static,
    ) -> ItineraryPlanner {
        ItineraryPlanner::new(weather, mock_generator(mock.clone()), Arc::new(history))
    }

    fn clear_skies() -> WeatherLookup {
        static_weather(clear_weather_reading())
    }

    /// History store whose every call fails.
    struct BrokenHistory;

    #[async_trait]
    impl HistoryStore for BrokenHistory {
        async fn recent_trips(
            &self,
            _: &str,
            _: Option<usize>,
        ) -> Result<Vec<TripHistoryEntry>, StorageError> {
            Err(StorageError::Unavailable { reason: "down".to_string() })
        }

        async fn append_trip(&self, _: &str, _: &TripHistoryEntry) -> Result<(), StorageError> {
            Err(StorageError::Unavailable { reason: "down".to_string() })
        }
    }

    #[tokio::test]
    async fn test_paris_end_to_end() -> Result<(), VoyageError> {
        let store = store_with_user().await?;
        let mock = MockGenerationProvider::replying("  Day 1: ...\n");
        let planner = build_planner(clear_skies(), &mock, store.clone());

        let outcome = planner.generate_itinerary(&paris_request()).await?;
        assert_eq!(outcome.itinerary, "Day 1: ...");
        assert_eq!(
            outcome.weather,
            Some(WeatherSnapshot {
                temp: 18,
                humidity: 60,
                condition: "Clear".to_string(),
                wind_speed: 18,
            })
        );
        assert_eq!(outcome.history, HistoryWrite::Recorded);

        let history = store.recent_trips(PARIS_EMAIL, None).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].destination, "Paris");
        assert_eq!(history[0].days, 5);
        assert_eq!(history[0].itinerary, "Day 1: ...");

        let prompts = mock.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Current Weather: Temperature is 18°C, Clear."));
        assert!(!prompts[0].contains("Previous Travel Style"));
        Ok(())
    }

    #[tokio::test]
    async fn test_weather_failure_gives_null_weather() -> Result<(), VoyageError> {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(failing_weather(500), &mock, InMemoryStore::new());

        let outcome = planner.generate_itinerary(&TripRequest::new("Paris")).await?;
        assert_eq!(outcome.weather, None);
        assert_eq!(outcome.history, HistoryWrite::Skipped);
        assert!(!mock.prompts().await[0].contains("Current Weather"));
        Ok(())
    }

    #[tokio::test]
    async fn test_weather_timeout_gives_null_weather() -> Result<(), VoyageError> {
        let slow = StaticWeatherProvider::reading(clear_weather_reading())
            .with_delay(Duration::from_millis(500));
        let weather = WeatherLookup::new(Arc::new(slow), Duration::from_millis(20));
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(weather, &mock, InMemoryStore::new());

        let outcome = planner.generate_itinerary(&TripRequest::new("Paris")).await?;
        assert_eq!(outcome.weather, None);
        assert_eq!(outcome.itinerary, "Day 1");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_destination_is_validation_error() {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(clear_skies(), &mock, InMemoryStore::new());

        let result = planner.generate_itinerary(&TripRequest::new("   ")).await;
        assert!(matches!(
            result,
            Err(VoyageError::Validation(ValidationError::RequiredFieldMissing { .. }))
        ));
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_and_skips_append() -> Result<(), StorageError> {
        let store = store_with_user().await?;
        let mock = MockGenerationProvider::failing(GenerationError::RequestFailed {
            provider: "mock".to_string(),
            status: 500,
            message: "quota exceeded".to_string(),
        });
        let planner = build_planner(clear_skies(), &mock, store.clone());

        let result = planner.generate_itinerary(&paris_request()).await;
        match result {
            Err(VoyageError::Generation(e)) => assert!(e.to_string().contains("quota exceeded")),
            other => panic!("expected generation error, got {:?}", other),
        }
        assert!(store.recent_trips(PARIS_EMAIL, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_generation_timeout_is_generation_error() {
        let mock = MockGenerationProvider::replying("late").with_delay(Duration::from_millis(500));
        let client = GenerationClient::new(Arc::new(mock), Duration::from_millis(20));
        let planner = ItineraryPlanner::new(
            WeatherLookup::disabled(),
            client,
            Arc::new(InMemoryStore::new()),
        );

        let result = planner.generate_itinerary(&TripRequest::new("Paris")).await;
        assert!(matches!(
            result,
            Err(VoyageError::Generation(GenerationError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_append_failure_still_returns_itinerary() -> Result<(), VoyageError> {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(clear_skies(), &mock, BrokenHistory);

        let outcome = planner.generate_itinerary(&paris_request()).await?;
        assert_eq!(outcome.itinerary, "Day 1");
        assert_eq!(outcome.history, HistoryWrite::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_identity_append_fails_softly() -> Result<(), VoyageError> {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(clear_skies(), &mock, InMemoryStore::new());

        let request = TripRequest::new("Paris").with_identity(Identity::parse("ghost@b.com"));
        let outcome = planner.generate_itinerary(&request).await?;
        assert_eq!(outcome.history, HistoryWrite::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn test_returning_user_clause_after_first_trip() -> Result<(), VoyageError> {
        let store = store_with_user().await?;
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(clear_skies(), &mock, store);

        planner.generate_itinerary(&paris_request()).await?;
        planner.generate_itinerary(&paris_request()).await?;

        let prompts = mock.prompts().await;
        assert!(!prompts[0].contains("Previous Travel Style"));
        assert!(prompts[1].contains("Previous Travel Style"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_tier_uses_moderate_description() -> Result<(), VoyageError> {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(WeatherLookup::disabled(), &mock, InMemoryStore::new());

        let request = TripRequest::new("Paris").with_budget(BudgetTier::from_label("unknown-tier"));
        planner.generate_itinerary(&request).await?;
        assert!(mock.prompts().await[0].contains(BudgetTier::Moderate.description()));
        Ok(())
    }

    #[tokio::test]
    async fn test_suggestions_malformed_output_falls_back() {
        let mock = MockGenerationProvider::replying("I cannot comply");
        let planner = build_planner(WeatherLookup::disabled(), &mock, InMemoryStore::new());

        let list = planner.generate_suggestions(None).await;
        assert!(list.used_fallback);
        assert_eq!(list.trips, fallback_suggestions());
    }

    #[tokio::test]
    async fn test_suggestions_generation_error_falls_back() {
        let mock = MockGenerationProvider::failing(GenerationError::EmptyCompletion {
            provider: "mock".to_string(),
        });
        let planner = build_planner(WeatherLookup::disabled(), &mock, BrokenHistory);

        let list = planner.generate_suggestions(Identity::parse(PARIS_EMAIL).as_ref()).await;
        assert!(list.used_fallback);
        assert!(list.trips.len() >= 3);
    }

    #[tokio::test]
    async fn test_suggestions_use_full_history() -> Result<(), VoyageError> {
        let store = store_with_user().await?;
        for (i, destination) in ["Goa", "Lima", "Oslo", "Rome"].into_iter().enumerate() {
            store
                .append_trip(PARIS_EMAIL, &history_entry(destination, 2, i as i64))
                .await?;
        }
        let mock = MockGenerationProvider::replying(
            "```json\n[{\"destination\":\"Hanoi, Vietnam\",\"highlights\":[\"Old Quarter\"]}]\n```",
        );
        let planner = build_planner(WeatherLookup::disabled(), &mock, store);

        let list = planner.generate_suggestions(Identity::parse(PARIS_EMAIL).as_ref()).await;
        assert!(!list.used_fallback);
        assert_eq!(list.trips[0].destination, "Hanoi, Vietnam");

        let prompt = &mock.prompts().await[0];
        assert!(prompt.contains("User has previously visited: Goa, Lima, Oslo, Rome."));
        Ok(())
    }

    #[tokio::test]
    async fn test_itinerary_history_read_failure_is_absorbed() -> Result<(), VoyageError> {
        let mock = MockGenerationProvider::replying("Day 1");
        let planner = build_planner(clear_skies(), &mock, BrokenHistory);

        let outcome = planner.generate_itinerary(&paris_request()).await?;
        assert_eq!(outcome.itinerary, "Day 1");
        assert!(!mock.prompts().await[0].contains("Previous Travel Style"));
        Ok(())
    }
}
