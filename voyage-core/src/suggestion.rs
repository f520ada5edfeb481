//! Destination suggestion records returned by the suggestions flow.

use serde::{Deserialize, Serialize};

/// One recommended destination.
///
/// Only `destination` is required when decoding generator output; the
/// remaining fields default to empty when the model leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    pub destination: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub best_time: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub ideal_for: String,
    #[serde(default)]
    pub must_try: String,
    #[serde(default)]
    pub travel_tip: String,
    /// Single emoji shown next to the card
    #[serde(default)]
    pub image: String,
}
