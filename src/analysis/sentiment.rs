use crate::analysis::config::Lexicon;
use crate::models::TextSentiment;

/// Score `text` by counting whole-token lexicon matches.
///
/// Tokens are the lowercase whitespace-separated words of `text`, punctuation
/// included, so "happy!" does not match "happy". No negation handling.
pub fn score(text: &str, lexicon: &Lexicon) -> TextSentiment {
    let lower = text.to_lowercase();

    let mut positive_count = 0usize;
    let mut negative_count = 0usize;
    for token in lower.split_whitespace() {
        if lexicon.is_positive(token) {
            positive_count += 1;
        }
        if lexicon.is_negative(token) {
            negative_count += 1;
        }
    }

    let total = positive_count + negative_count;
    if total == 0 {
        return TextSentiment::UNSCORED;
    }

    let positive = positive_count as f64 / total as f64;
    let negative = negative_count as f64 / total as f64;
    TextSentiment {
        positive,
        negative,
        neutral: (1.0 - positive - negative).max(0.0),
    }
}
