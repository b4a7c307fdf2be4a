//! Journal entry models.
//!
//! `sentiment`, `keywords`, `recommendations`, `word_count` and
//! `reading_time_minutes` are derived from `content` by
//! [`TextAnalyzer`](crate::analysis::TextAnalyzer) and recomputed whenever the
//! content changes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{KeywordSet, MoodLabel, Recommendation, TextSentiment};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<MoodLabel>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub is_private: bool,
    pub sentiment: TextSentiment,
    pub keywords: KeywordSet,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub reading_time_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for writing a new journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDraft {
    pub title: Option<String>,
    pub content: String,
    pub mood: Option<MoodLabel>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default = "default_private")]
    pub is_private: bool,
    /// Defaults to the creation time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_private() -> bool {
    true
}

impl JournalDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
            mood: None,
            tags: BTreeSet::new(),
            is_private: true,
            timestamp: None,
        }
    }
}

/// Partial edit of a journal entry; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<MoodLabel>,
    pub tags: Option<BTreeSet<String>>,
    pub is_private: Option<bool>,
}

impl JournalUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.mood.is_none()
            && self.tags.is_none()
            && self.is_private.is_none()
    }
}

/// Whitespace-delimited token count.
pub fn count_words(content: &str) -> u32 {
    content.split_whitespace().count() as u32
}

/// Minutes to read `word_count` words at `words_per_minute`, rounded up.
pub fn reading_time_minutes(word_count: u32, words_per_minute: u32) -> u32 {
    if words_per_minute == 0 {
        return 0;
    }
    word_count.div_ceil(words_per_minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_surrounding_whitespace() {
        assert_eq!(count_words("  slept badly\tagain \n today "), 4);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_minutes(0, 200), 0);
        assert_eq!(reading_time_minutes(1, 200), 1);
        assert_eq!(reading_time_minutes(200, 200), 1);
        assert_eq!(reading_time_minutes(201, 200), 2);
    }
}
