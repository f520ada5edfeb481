//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use voyage_llm::GenerationClient;
use voyage_planner::ItineraryPlanner;
use voyage_storage::{HistoryStore, UserStore};
use voyage_weather::WeatherLookup;

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Account records, history included on reads.
    pub users: Arc<dyn UserStore>,
    /// Itinerary and suggestion flows.
    pub planner: ItineraryPlanner,
    pub start_time: Instant,
}

impl AppState {
    /// Wire one store into both storage roles and build the planner over it.
    pub fn new<S>(store: Arc<S>, weather: WeatherLookup, generator: GenerationClient) -> Self
    where
        S: UserStore + HistoryStore + 'static,
    {
        let history: Arc<dyn HistoryStore> = store.clone();
        let users: Arc<dyn UserStore> = store;
        Self {
            users,
            planner: ItineraryPlanner::new(weather, generator, history),
            start_time: Instant::now(),
        }
    }
}

crate::impl_from_ref!(Arc<dyn UserStore>, users);
crate::impl_from_ref!(ItineraryPlanner, planner);
crate::impl_from_ref!(Instant, start_time);
