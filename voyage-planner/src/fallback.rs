//! Default suggestions served when live suggestions are unavailable.

use voyage_core::SuggestionRecord;

/// Note attached to responses that carry the default list.
pub const FALLBACK_NOTE: &str = "Showing default suggestions";

fn record(
    destination: &str,
    tagline: &str,
    highlights: [&str; 4],
    best_time: &str,
    budget: &str,
    ideal_for: &str,
    must_try: &str,
    travel_tip: &str,
    image: &str,
) -> SuggestionRecord {
    SuggestionRecord {
        destination: destination.to_string(),
        tagline: tagline.to_string(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
        best_time: best_time.to_string(),
        budget: budget.to_string(),
        ideal_for: ideal_for.to_string(),
        must_try: must_try.to_string(),
        travel_tip: travel_tip.to_string(),
        image: image.to_string(),
    }
}

/// Fixed, geographically diverse suggestions (Europe, Asia, North America).
pub fn fallback_suggestions() -> Vec<SuggestionRecord> {
    vec![
        record(
            "Santorini, Greece",
            "Where blue domes meet endless azure seas",
            [
                "Iconic white-washed buildings",
                "Stunning sunset views at Oia",
                "Ancient Akrotiri ruins",
                "Volcanic beaches",
            ],
            "April-October for perfect weather",
            "₹35,000-70,000 for 3 days",
            "Couples, photographers, luxury travelers",
            "Watch sunset from Oia castle with local wine",
            "Book accommodation in Oia or Fira for best views",
            "🏛️",
        ),
        record(
            "Kyoto, Japan",
            "Ancient temples and cherry blossoms in perfect harmony",
            [
                "1000+ Buddhist temples",
                "Geisha districts",
                "Bamboo forest walks",
                "Traditional tea ceremonies",
            ],
            "March-April (cherry blossoms) or October-November (fall colors)",
            "₹40,000-80,000 for 3 days",
            "Culture enthusiasts, photographers, peaceful retreats",
            "Early morning visit to Fushimi Inari shrine",
            "Buy a Kyoto bus pass for unlimited travel",
            "⛩️",
        ),
        record(
            "Banff, Canada",
            "Turquoise lakes and majestic Rocky Mountains",
            ["Lake Louise", "Moraine Lake", "Wildlife spotting", "Gondola rides"],
            "June-September for hiking, December-March for skiing",
            "₹50,000-100,000 for 3 days",
            "Adventure seekers, nature lovers, outdoor enthusiasts",
            "Sunrise at Moraine Lake",
            "Book accommodation 6 months in advance",
            "🏔️",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_at_least_three_complete_records() {
        let trips = fallback_suggestions();
        assert!(trips.len() >= 3);
        for trip in &trips {
            assert!(!trip.destination.is_empty());
            assert!(!trip.tagline.is_empty());
            assert_eq!(trip.highlights.len(), 4);
            assert!(!trip.image.is_empty());
        }
    }

    #[test]
    fn test_fallback_destinations() {
        let names: Vec<String> =
            fallback_suggestions().into_iter().map(|t| t.destination).collect();
        assert_eq!(names, vec!["Santorini, Greece", "Kyoto, Japan", "Banff, Canada"]);
    }
}
