//! Prompt construction for review synthesis.

use brewmap_core::{Language, PlaceDetails};

/// Recent reviews quoted in the prompt, newest first as the API returns them.
const MAX_QUOTED_REVIEWS: usize = 5;

/// Builds the user prompt asking for one short review per language.
///
/// The reply is requested as a single JSON object keyed by language code
/// (`{"en": "...", "zh": "..."}`).
#[must_use]
pub fn build_prompt(place: &PlaceDetails, languages: &[Language]) -> String {
    let mut prompt = String::with_capacity(2048);

    let language_names: Vec<&str> = languages.iter().map(|l| l.display_name()).collect();
    prompt.push_str(&format!(
        "You are writing a short review of a place people go to work, study or read. \
         Using the information below, write one review in each of these languages: {}.\n",
        language_names.join(", ")
    ));

    prompt.push_str("\nPLACE INFORMATION:\n");
    prompt.push_str(&format!("- Name: {}\n", place.display_name()));
    prompt.push_str(&format!(
        "- Address: {}\n",
        place
            .formatted_address
            .as_deref()
            .unwrap_or("Address not available")
    ));
    match place.rating {
        Some(rating) => {
            prompt.push_str(&format!(
                "- Google Rating: {rating}/5 ({} reviews)\n",
                place.user_ratings_total.unwrap_or(0)
            ));
        }
        None => prompt.push_str("- Google Rating: N/A\n"),
    }
    if !place.types.is_empty() {
        prompt.push_str(&format!("- Place Types: {}\n", place.types.join(", ")));
    }

    prompt.push_str("\nOPENING HOURS:\n");
    match place.opening_hours.as_ref() {
        Some(hours) if !hours.weekday_text.is_empty() => {
            for line in &hours.weekday_text {
                prompt.push_str(line);
                prompt.push('\n');
            }
        }
        _ => prompt.push_str("Hours not available\n"),
    }

    prompt.push_str("\nRECENT CUSTOMER REVIEWS:\n");
    if place.recent_reviews.is_empty() {
        prompt.push_str("No recent reviews available\n");
    }
    for review in place.recent_reviews.iter().take(MAX_QUOTED_REVIEWS) {
        let rating = review
            .rating
            .map_or_else(|| "N/A".to_owned(), |r| r.to_string());
        prompt.push_str(&format!("Rating: {rating}/5 - {}\n", review.text));
    }

    prompt.push_str(
        "\nREVIEW REQUIREMENTS:\n\
         1. Focus on how well the place suits working, studying and reading.\n\
         2. Mention these only when the information supports them: whether long stays \
         are welcome, free WiFi, power outlets, and any highlight such as the view, \
         the atmosphere, the food or the drinks.\n\
         3. Practical details like weekend hours, closing times and how easy it is to \
         get there are welcome but secondary to the tone.\n\
         4. Keep it casual and first-person, as if written after a visit. Focus on \
         the overall impression.\n\
         5. Keep each review simple, 20 to 50 words.\n",
    );

    if languages.contains(&Language::Zh) {
        prompt.push_str(
            "\nStyle reference for the Chinese review:\n\
             一直都有位子 离地铁站也就3分钟 想要聊天可以在一楼 想专心工作的下楼有很多位子和插座 \
             wifi也很稳定 #咖啡馆 #自习室\n",
        );
    }

    prompt.push_str("\nOUTPUT FORMAT:\nReturn only a JSON object with exactly these keys:\n{\n");
    let keys: Vec<String> = languages
        .iter()
        .map(|l| format!("    \"{}\": \"<{} review>\"", l.code(), l.display_name()))
        .collect();
    prompt.push_str(&keys.join(",\n"));
    prompt.push_str("\n}\n");

    prompt
}
