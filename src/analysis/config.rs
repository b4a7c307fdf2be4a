use std::collections::HashSet;

/// Upper bound on keywords kept per text.
pub const MAX_KEYWORDS: usize = 10;
/// Upper bound on recommendations returned per text.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Tunable limits for text analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum number of keywords kept per text
    pub keyword_limit: usize,

    /// Tokens this long or shorter are never keywords
    pub max_ignored_token_len: usize,

    /// Maximum number of recommendations kept per text
    pub recommendation_limit: usize,

    /// Sentiment share above which the song rules fire
    pub sentiment_threshold: f64,

    /// Reading speed used for `reading_time_minutes`
    pub words_per_minute: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keyword_limit: MAX_KEYWORDS,
            max_ignored_token_len: 3,
            recommendation_limit: MAX_RECOMMENDATIONS,
            sentiment_threshold: 0.6,
            words_per_minute: 200,
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "excited", "great", "wonderful", "amazing", "fantastic", "love", "good",
    "excellent", "positive", "optimistic", "grateful", "blessed", "content", "peaceful", "calm",
    "relaxed", "confident", "proud", "accomplished", "successful", "motivated", "inspired",
    "hopeful", "cheerful", "bright", "sunny", "beautiful", "perfect",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "frustrated", "disappointed", "worried", "anxious", "stressed", "depressed",
    "lonely", "hurt", "pain", "suffering", "terrible", "awful", "horrible", "bad", "negative",
    "pessimistic", "hopeless", "helpless", "overwhelmed", "exhausted", "tired", "fear", "scared",
    "nervous", "upset", "annoyed", "irritated", "furious", "devastated", "broken", "lost",
    "confused", "doubt", "uncertain", "insecure", "vulnerable", "weak", "defeated", "failure",
    "mistake", "regret", "guilt", "shame",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

/// Immutable word lists used by the scorer and the keyword extractor.
///
/// All words are stored lowercase; matching is exact on whole tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    pub fn new<P, N, S>(positive: P, negative: N, stop_words: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            positive: lowercase_set(positive),
            negative: lowercase_set(negative),
            stop_words: lowercase_set(stop_words),
        }
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Returns a copy with any provided list replacing the current one.
    pub fn with_overrides(
        &self,
        positive: Option<&[String]>,
        negative: Option<&[String]>,
        stop_words: Option<&[String]>,
    ) -> Self {
        Self {
            positive: positive.map_or_else(|| self.positive.clone(), lowercase_set),
            negative: negative.map_or_else(|| self.negative.clone(), lowercase_set),
            stop_words: stop_words.map_or_else(|| self.stop_words.clone(), lowercase_set),
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS, STOP_WORDS)
    }
}

fn lowercase_set<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lexicon_sizes() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.positive.len(), 30);
        assert_eq!(lexicon.negative.len(), 45);
        assert_eq!(lexicon.stop_words.len(), 51);
    }

    #[test]
    fn overrides_replace_only_given_lists() {
        let custom = vec!["Radiant".to_string()];
        let lexicon = Lexicon::default().with_overrides(Some(&custom), None, None);
        assert!(lexicon.is_positive("radiant"));
        assert!(!lexicon.is_positive("happy"));
        assert!(lexicon.is_negative("sad"));
        assert!(lexicon.is_stop_word("the"));
    }
}
