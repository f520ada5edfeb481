//! User records, profile fields and trip statistics.

use crate::trip::TripHistoryEntry;
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys a profile update may never write. They are owned by signup,
/// credential handling or the history append path.
pub const RESERVED_PROFILE_KEYS: &[&str] = &[
    "_id",
    "email",
    "password",
    "password_hash",
    "itinerary_history",
    "created_at",
];

/// Drop reserved keys and null values from caller-supplied profile fields.
pub fn profile_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(key, value)| !value.is_null() && !RESERVED_PROFILE_KEYS.contains(&key.as_str()))
        .collect()
}

/// A user about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    /// Salted credential digest, never the plain password
    pub credential: String,
    pub profile: Map<String, Value>,
    pub created_at: Timestamp,
}

/// A stored user as returned to clients. The credential is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
    #[serde(default)]
    pub itinerary_history: Vec<TripHistoryEntry>,
    pub created_at: Timestamp,
}

/// Aggregates over a user's trip history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_trips: usize,
    pub total_days: u64,
    /// Destinations in history order, repeats included
    pub destinations: Vec<String>,
    pub recent_trip: Option<TripHistoryEntry>,
}

impl UserStats {
    pub fn from_history(history: &[TripHistoryEntry]) -> Self {
        Self {
            total_trips: history.len(),
            total_days: history.iter().map(|entry| u64::from(entry.days)).sum(),
            destinations: history.iter().map(|entry| entry.destination.clone()).collect(),
            recent_trip: history.last().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::BudgetTier;
    use serde_json::json;

    fn entry(destination: &str, days: u32) -> TripHistoryEntry {
        TripHistoryEntry {
            destination: destination.to_string(),
            days,
            interests: String::new(),
            budget: BudgetTier::Moderate,
            itinerary: format!("{} plan", destination),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_profile_fields_drops_reserved_and_null() {
        let fields = json!({
            "name": "Asha",
            "email": "other@b.com",
            "password": "x",
            "itinerary_history": [],
            "created_at": "2020-01-01T00:00:00Z",
            "phone": null,
            "city": "Pune"
        });
        let Value::Object(map) = fields else {
            panic!("expected object");
        };
        let cleaned = profile_fields(map);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.get("name"), Some(&json!("Asha")));
        assert_eq!(cleaned.get("city"), Some(&json!("Pune")));
    }

    #[test]
    fn test_user_stats_from_history() {
        let history = vec![entry("Goa", 3), entry("Paris", 5), entry("Goa", 2)];
        let stats = UserStats::from_history(&history);
        assert_eq!(stats.total_trips, 3);
        assert_eq!(stats.total_days, 10);
        assert_eq!(stats.destinations, vec!["Goa", "Paris", "Goa"]);
        assert_eq!(stats.recent_trip.map(|t| t.days), Some(2));
    }

    #[test]
    fn test_user_stats_empty_history() -> Result<(), serde_json::Error> {
        let stats = UserStats::from_history(&[]);
        let json = serde_json::to_value(&stats)?;
        assert_eq!(
            json,
            json!({"totalTrips": 0, "totalDays": 0, "destinations": [], "recentTrip": null})
        );
        Ok(())
    }

    #[test]
    fn test_user_record_flattens_profile() -> Result<(), serde_json::Error> {
        let mut profile = Map::new();
        profile.insert("name".to_string(), json!("Asha"));
        let record = UserRecord {
            email: "a@b.com".to_string(),
            profile,
            itinerary_history: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&record)?;
        assert_eq!(json["name"], json!("Asha"));
        assert_eq!(json["email"], json!("a@b.com"));
        assert_eq!(json["itinerary_history"], json!([]));
        assert!(json.get("password").is_none());
        Ok(())
    }
}
