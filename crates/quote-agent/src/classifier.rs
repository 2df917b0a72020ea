//! Random vs. topic request routing

/// Substrings that mark a request as asking for a random quote
pub const RANDOM_KEYWORDS: [&str; 4] = ["random", "surprise", "any topic", "choose"];

/// Which generation path a request takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No topic wanted; the model picks one
    Random,
    /// Quote about a topic extracted from the request
    Topic,
}

/// Classify request text by case-insensitive substring match
pub fn classify(text: &str) -> Classification {
    let text = text.trim().to_lowercase();
    if RANDOM_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        Classification::Random
    } else {
        Classification::Topic
    }
}
