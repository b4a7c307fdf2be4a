use serde::{Deserialize, Serialize};

/// Lexicon sentiment of a text blob.
///
/// When at least one lexicon word matched, `positive + negative == 1` and
/// `neutral == 0`. With no matches the scorer returns [`TextSentiment::UNSCORED`],
/// whose fields do not sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TextSentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Strictly dominant field of a [`TextSentiment`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

impl TextSentiment {
    /// Result for text without a single lexicon match.
    pub const UNSCORED: TextSentiment = TextSentiment {
        positive: 0.5,
        negative: 0.5,
        neutral: 1.0,
    };

    /// Positive or negative only when strictly greater than both other fields;
    /// ties and the unscored triple fall through to neutral.
    pub fn dominant(&self) -> SentimentClass {
        if self.positive > self.negative && self.positive > self.neutral {
            SentimentClass::Positive
        } else if self.negative > self.positive && self.negative > self.neutral {
            SentimentClass::Negative
        } else {
            SentimentClass::Neutral
        }
    }
}

/// Frequency-ranked salient terms of a text, most frequent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Builds a set from already-ranked words, dropping repeats after their first position.
    pub fn from_ranked<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranked: Vec<String> = Vec::new();
        for word in words {
            let word = word.into();
            if !ranked.contains(&word) {
                ranked.push(word);
            }
        }
        Self(ranked)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|w| w == word)
    }

    pub fn contains_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.contains(w))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscored_triple_is_neutral() {
        assert_eq!(TextSentiment::UNSCORED.dominant(), SentimentClass::Neutral);
    }

    #[test]
    fn exact_tie_is_neutral() {
        let tie = TextSentiment {
            positive: 0.5,
            negative: 0.5,
            neutral: 0.0,
        };
        assert_eq!(tie.dominant(), SentimentClass::Neutral);

        let negative = TextSentiment {
            positive: 0.25,
            negative: 0.75,
            neutral: 0.0,
        };
        assert_eq!(negative.dominant(), SentimentClass::Negative);
    }

    #[test]
    fn from_ranked_keeps_first_position_of_repeats() {
        let set = KeywordSet::from_ranked(["work", "sleep", "work"]);
        assert_eq!(set.as_slice(), &["work".to_string(), "sleep".to_string()]);
        assert!(set.contains_any(&["stress", "sleep"]));
    }
}
