//! Extraction of per-language reviews from free-form model output.

use brewmap_core::{GeneratedReview, Language};

use crate::error::ReviewError;

/// Parses the first `{` .. last `}` span of `reply` as a JSON object and
/// returns one review per requested language that has non-blank text.
///
/// Languages missing from the object are left out of the result.
pub(crate) fn extract_reviews(
    reply: &str,
    languages: &[Language],
) -> Result<Vec<GeneratedReview>, ReviewError> {
    let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) else {
        return Err(ReviewError::MalformedReply(snippet(reply)));
    };
    if end < start {
        return Err(ReviewError::MalformedReply(snippet(reply)));
    }

    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&reply[start..=end])
            .map_err(|_| ReviewError::MalformedReply(snippet(reply)))?;

    Ok(languages
        .iter()
        .filter_map(|&language| {
            let text = object.get(language.code())?.as_str()?.trim();
            (!text.is_empty()).then(|| GeneratedReview {
                language,
                text: text.to_owned(),
            })
        })
        .collect())
}

fn snippet(reply: &str) -> String {
    const MAX_CHARS: usize = 120;
    let mut out: String = reply.chars().take(MAX_CHARS).collect();
    if reply.chars().count() > MAX_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_languages() {
        let reply = r#"{"en": "Quiet upstairs, fast wifi.", "zh": "楼上很安静 wifi很快"}"#;
        let reviews = extract_reviews(reply, &Language::ALL).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].language, Language::En);
        assert_eq!(reviews[0].text, "Quiet upstairs, fast wifi.");
        assert_eq!(reviews[1].language, Language::Zh);
    }

    #[test]
    fn ignores_prose_around_the_object() {
        let reply = "Here you go:\n```json\n{\"en\": \"Great for long stays.\"}\n```\nEnjoy!";
        let reviews = extract_reviews(reply, &[Language::En]).unwrap();
        assert_eq!(reviews[0].text, "Great for long stays.");
    }

    #[test]
    fn missing_language_is_absent() {
        let reply = r#"{"zh": "有插座有网"}"#;
        let reviews = extract_reviews(reply, &Language::ALL).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].language, Language::Zh);
    }

    #[test]
    fn blank_and_non_string_values_are_absent() {
        let reply = r#"{"en": "   ", "zh": 42}"#;
        let reviews = extract_reviews(reply, &Language::ALL).unwrap();
        assert!(reviews.is_empty());
    }

    #[test]
    fn no_braces_is_malformed() {
        let err = extract_reviews("Sorry, I can't help with that.", &Language::ALL).unwrap_err();
        assert!(matches!(err, ReviewError::MalformedReply(_)));
    }

    #[test]
    fn reversed_braces_is_malformed() {
        let err = extract_reviews("} nothing {", &Language::ALL).unwrap_err();
        assert!(matches!(err, ReviewError::MalformedReply(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = extract_reviews("{en: nope}", &Language::ALL).unwrap_err();
        assert!(matches!(err, ReviewError::MalformedReply(_)));
    }
}
