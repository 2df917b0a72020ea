//! Topic extraction from free-form request text

/// Topic used when nothing usable can be extracted
pub const DEFAULT_TOPIC: &str = "general inspiration";

/// Words stripped, in order, when the request names no explicit topic
const FILLER_WORDS: [&str; 4] = ["quote", "generate", "create", "give me"];

/// Extract a quote topic from the request text
///
/// The text is lower-cased and trimmed first, then the first matching rule
/// wins:
///
/// 1. Everything after the first `about`, trimmed, with trailing `?`/`.`
///    removed, if non-empty.
/// 2. If the text mentions `quote`, the text with each filler word removed,
///    if longer than two characters. Leftover words are kept as-is, so
///    `"generate a motivational quote"` yields `"a motivational"`.
/// 3. [`DEFAULT_TOPIC`].
pub fn extract_topic(text: &str) -> String {
    let text = text.trim().to_lowercase();

    if let Some((_, rest)) = text.split_once("about") {
        let topic = rest.trim().trim_end_matches(['?', '.']);
        if !topic.is_empty() {
            return topic.to_string();
        }
    }

    if text.contains("quote") {
        let stripped = FILLER_WORDS
            .iter()
            .fold(text.clone(), |acc, word| acc.replace(word, ""));
        let topic = stripped.trim();
        if topic.chars().count() > 2 {
            return topic.to_string();
        }
    }

    DEFAULT_TOPIC.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_clause() {
        assert_eq!(extract_topic("Generate a quote about success"), "success");
        assert_eq!(extract_topic("Create a quote about teamwork?"), "teamwork");
        assert_eq!(
            extract_topic("Give me an inspirational quote about courage."),
            "courage"
        );
        assert_eq!(extract_topic("  About   Hope  "), "hope");
    }

    #[test]
    fn test_about_splits_on_first_occurrence() {
        assert_eq!(
            extract_topic("a quote about thinking about life"),
            "thinking about life"
        );
    }

    #[test]
    fn test_about_wins_over_quote() {
        assert_eq!(extract_topic("quote about patience"), "patience");
    }

    #[test]
    fn test_empty_about_falls_through_to_quote_rule() {
        assert_eq!(extract_topic("generate a quote about?"), "a  about?");
    }

    #[test]
    fn test_quote_leftovers_are_literal() {
        assert_eq!(extract_topic("Generate a motivational quote"), "a motivational");
        assert_eq!(extract_topic("Give me a quote on grit"), "a  on grit");
    }

    #[test]
    fn test_short_leftover_uses_default() {
        assert_eq!(extract_topic("Give me a quote"), DEFAULT_TOPIC);
        assert_eq!(extract_topic("quote"), DEFAULT_TOPIC);
    }

    #[test]
    fn test_default() {
        assert_eq!(extract_topic(""), DEFAULT_TOPIC);
        assert_eq!(extract_topic("   "), DEFAULT_TOPIC);
        assert_eq!(extract_topic("hello there"), DEFAULT_TOPIC);
    }
}
