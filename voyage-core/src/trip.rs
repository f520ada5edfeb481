//! Trip request types, closed enumerations and persisted history entries.

use crate::error::ValidationError;
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day count used when a request carries no usable value.
pub const DEFAULT_DAY_COUNT: u32 = 3;

/// Interest text substituted into prompts when the caller left it blank.
pub const DEFAULT_INTERESTS: &str = "general sightseeing";

// ============================================================================
// BUDGET TIER
// ============================================================================

/// Spending tier for a trip. Unknown labels resolve to [`BudgetTier::Moderate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// Resolve a free-text label, case-insensitively. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "budget" => BudgetTier::Budget,
            "moderate" => BudgetTier::Moderate,
            "luxury" => BudgetTier::Luxury,
            _ => BudgetTier::default(),
        }
    }

    /// Resolve an optional label, using the default tier when absent.
    pub fn from_optional(label: Option<&str>) -> Self {
        label.map(Self::from_label).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::Moderate => "moderate",
            BudgetTier::Luxury => "luxury",
        }
    }

    /// Spending guidance injected into itinerary prompts.
    pub fn description(&self) -> &'static str {
        match self {
            BudgetTier::Budget => {
                "Budget-friendly options (₹5,000-15,000/day). Focus on affordable \
                 accommodations, local transport, street food, and free/low-cost attractions."
            }
            BudgetTier::Moderate => {
                "Moderate budget (₹15,000-35,000/day). Mix of comfort hotels, mid-range \
                 restaurants, guided tours, and popular attractions."
            }
            BudgetTier::Luxury => {
                "Luxury experience (₹35,000+/day). Premium hotels, fine dining, private \
                 tours, spa experiences, and exclusive activities."
            }
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MEAL PREFERENCE
// ============================================================================

/// Dietary preference for restaurant recommendations.
/// Unknown labels resolve to [`MealPreference::NoPreference`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum MealPreference {
    Vegetarian,
    NonVegetarian,
    Vegan,
    #[default]
    NoPreference,
}

impl MealPreference {
    /// Resolve a free-text label, case-insensitively. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "vegetarian" => MealPreference::Vegetarian,
            "non-vegetarian" => MealPreference::NonVegetarian,
            "vegan" => MealPreference::Vegan,
            "no-preference" => MealPreference::NoPreference,
            _ => MealPreference::default(),
        }
    }

    pub fn from_optional(label: Option<&str>) -> Self {
        label.map(Self::from_label).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealPreference::Vegetarian => "vegetarian",
            MealPreference::NonVegetarian => "non-vegetarian",
            MealPreference::Vegan => "vegan",
            MealPreference::NoPreference => "no-preference",
        }
    }

    /// Dining guidance injected into itinerary prompts.
    pub fn description(&self) -> &'static str {
        match self {
            MealPreference::Vegetarian => {
                "All meal recommendations should be strictly vegetarian."
            }
            MealPreference::NonVegetarian => {
                "Include both vegetarian and non-vegetarian options with local specialties."
            }
            MealPreference::Vegan => {
                "All recommendations should be vegan-friendly (no animal products)."
            }
            MealPreference::NoPreference => {
                "Include diverse food options based on local cuisine."
            }
        }
    }
}

impl fmt::Display for MealPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// IDENTITY
// ============================================================================

/// Email-shaped lookup key for a user's record and history.
///
/// Not validated for deliverability; only blank values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Build an identity from raw caller input. Blank input means "no identity".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// DAY COUNT
// ============================================================================

/// Interpret a JSON day-count value.
///
/// Accepts positive integers given as numbers or numeric strings. Anything
/// else (absent, zero, negative, fractional, non-numeric) yields
/// [`DEFAULT_DAY_COUNT`].
pub fn day_count_from_json(value: Option<&serde_json::Value>) -> u32 {
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .filter(|days| *days > 0)
        .and_then(|days| u32::try_from(days).ok())
        .unwrap_or(DEFAULT_DAY_COUNT)
}

// ============================================================================
// TRIP REQUEST
// ============================================================================

/// One itinerary request, normalized from caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub destination: String,
    pub days: u32,
    pub interests: String,
    pub budget: BudgetTier,
    pub meal_preference: MealPreference,
    pub identity: Option<Identity>,
}

impl TripRequest {
    /// Create a request with default days, tier and meal preference.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            days: DEFAULT_DAY_COUNT,
            interests: String::new(),
            budget: BudgetTier::default(),
            meal_preference: MealPreference::default(),
            identity: None,
        }
    }

    /// Set the day count. Zero is treated as "not supplied".
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = if days == 0 { DEFAULT_DAY_COUNT } else { days };
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_budget(mut self, budget: BudgetTier) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_meal_preference(mut self, meal_preference: MealPreference) -> Self {
        self.meal_preference = meal_preference;
        self
    }

    pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    /// Check the fields that cannot be defaulted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "destination".to_string(),
            });
        }
        Ok(())
    }

    /// Destination with surrounding whitespace removed.
    pub fn destination(&self) -> &str {
        self.destination.trim()
    }

    /// Interests to describe in prompts, substituting a default when blank.
    pub fn interests_or_default(&self) -> &str {
        let trimmed = self.interests.trim();
        if trimmed.is_empty() {
            DEFAULT_INTERESTS
        } else {
            trimmed
        }
    }

    /// Build the history entry recorded after a successful generation.
    pub fn history_entry(
        &self,
        itinerary: impl Into<String>,
        created_at: Timestamp,
    ) -> TripHistoryEntry {
        TripHistoryEntry {
            destination: self.destination().to_string(),
            days: self.days,
            interests: self.interests.clone(),
            budget: self.budget,
            itinerary: itinerary.into(),
            created_at,
        }
    }
}

// ============================================================================
// TRIP HISTORY ENTRY
// ============================================================================

/// One persisted itinerary. Entries are append-only; `created_at` orders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TripHistoryEntry {
    pub destination: String,
    pub days: u32,
    pub interests: String,
    pub budget: BudgetTier,
    pub itinerary: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}
