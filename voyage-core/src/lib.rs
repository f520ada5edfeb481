//! Voyage Core - Domain Types
//!
//! Pure data structures shared by every other crate in the workspace:
//! trip requests and their closed enumerations, weather readings and
//! snapshots, persisted history entries, user records, suggestion records,
//! provider configuration and the error taxonomy.
//!
//! This crate performs no I/O.

pub mod config;
pub mod error;
pub mod suggestion;
pub mod trip;
pub mod user;
pub mod weather;

pub use config::{GenerationConfig, WeatherConfig, MAX_WEATHER_TIMEOUT};
pub use error::{
    ConfigError, GenerationError, InterpretationError, StorageError, ValidationError,
    VoyageError, VoyageResult, WeatherError,
};
pub use suggestion::SuggestionRecord;
pub use trip::{
    day_count_from_json, BudgetTier, Identity, MealPreference, TripHistoryEntry, TripRequest,
    DEFAULT_DAY_COUNT, DEFAULT_INTERESTS,
};
pub use user::{profile_fields, NewUser, UserRecord, UserStats, RESERVED_PROFILE_KEYS};
pub use weather::{WeatherReading, WeatherSnapshot};

/// Timestamp type using UTC timezone.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
