//! Prompt composition
//!
//! Pure functions that turn trip parameters, optional weather and optional
//! history into the natural-language request sent to the generator.
//! Optional clauses appear exactly when their inputs are present.

use voyage_core::{TripHistoryEntry, TripRequest, WeatherSnapshot};

/// Number of destinations requested from the suggestions prompt.
pub const SUGGESTION_COUNT: usize = 6;

const RETURNING_USER_CLAUSE: &str =
    "User's Previous Travel Style: Based on past trips, the user enjoys personalized experiences.";

/// Weather sentence added to itinerary prompts when a snapshot exists.
pub fn weather_clause(weather: &WeatherSnapshot) -> String {
    format!(
        "Current Weather: Temperature is {}°C, {}. Consider this for outdoor activities and packing suggestions.",
        weather.temp, weather.condition
    )
}

/// Build the itinerary prompt.
///
/// History only toggles the returning-user clause; its content is not quoted.
pub fn compose_itinerary_prompt(
    request: &TripRequest,
    weather: Option<&WeatherSnapshot>,
    history: &[TripHistoryEntry],
) -> String {
    let mut context = vec![
        format!("Traveler Interests: {}", request.interests_or_default()),
        format!("Budget: {}", request.budget.description()),
        format!("Meal Preference: {}", request.meal_preference.description()),
    ];
    if let Some(weather) = weather {
        context.push(weather_clause(weather));
    }
    if !history.is_empty() {
        context.push(RETURNING_USER_CLAUSE.to_string());
    }

    format!(
        "You are an expert travel planner. Create a detailed {days}-day travel itinerary for {destination}.\n\
         \n\
         {context}\n\
         \n\
         Structure the itinerary with these sections:\n\
         1. Overview & Best Time to Visit\n\
         2. Day-by-Day Plan: for each of the {days} days give Morning, Afternoon and Evening activities and an estimated daily budget\n\
         3. Recommended Restaurants matching the meal preference\n\
         4. Accommodation: three hotel options that fit the budget\n\
         5. Local Transportation\n\
         6. Packing List\n\
         7. Money-Saving Tips\n\
         8. Safety & Emergency Information\n\
         9. Total Estimated Budget\n\
         \n\
         Use clear headings and keep the tone friendly and practical.",
        days = request.days,
        destination = request.destination(),
        context = context.join("\n"),
    )
}

/// Build the suggestions prompt.
///
/// With history present the prompt lists past destinations and interests and
/// asks the model to avoid repeats.
pub fn compose_suggestions_prompt(history: &[TripHistoryEntry]) -> String {
    let mut prompt = format!(
        "You are a travel expert. Suggest exactly {count} diverse travel destinations from around the world, \
         mixing continents, climates and trip styles.\n",
        count = SUGGESTION_COUNT,
    );

    if !history.is_empty() {
        let visited = distinct(history.iter().map(|entry| entry.destination.trim()));
        let interests = distinct(history.iter().map(|entry| entry.interests.trim()));

        prompt.push_str(&format!("\nUser has previously visited: {}.\n", visited.join(", ")));
        if !interests.is_empty() {
            prompt.push_str(&format!("User interests: {}.\n", interests.join(", ")));
        }
        prompt.push_str("Avoid destinations the user has already visited.\n");
    }

    prompt.push_str(
        "\nRespond with a JSON array. Each element must be an object with exactly these keys:\n\
         - \"destination\": city and country\n\
         - \"tagline\": one catchy sentence\n\
         - \"highlights\": array of 4 short highlight strings\n\
         - \"bestTime\": best months to visit\n\
         - \"budget\": estimated cost range in ₹ for 3 days\n\
         - \"idealFor\": the kind of traveler it suits\n\
         - \"mustTry\": one signature experience\n\
         - \"travelTip\": one practical tip\n\
         - \"image\": a single emoji representing the place\n\
         \n\
         Return ONLY the JSON array, no other text.",
    );
    prompt
}

/// Non-empty values in first-seen order, without repeats.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
