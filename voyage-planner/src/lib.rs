//! Voyage Planner - itinerary orchestration
//!
//! Turns a trip request into generated itinerary text and destination
//! suggestions:
//!
//! - [`prompt`]: pure prompt builders
//! - [`interpret`]: plain-text and structured-list interpretation
//! - [`fallback`]: the default suggestion list
//! - [`orchestrator`]: [`ItineraryPlanner`], which sequences weather, history,
//!   prompt, generation and persistence

pub mod fallback;
pub mod interpret;
pub mod orchestrator;
pub mod prompt;

pub use fallback::{fallback_suggestions, FALLBACK_NOTE};
pub use interpret::{
    interpret_itinerary, interpret_suggestions, parse_suggestions, strip_code_fence,
    SuggestionList,
};
pub use orchestrator::{HistoryWrite, ItineraryOutcome, ItineraryPlanner, ITINERARY_HISTORY_LIMIT};
pub use prompt::{
    compose_itinerary_prompt, compose_suggestions_prompt, weather_clause, SUGGESTION_COUNT,
};
