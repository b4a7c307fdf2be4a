//! Write-time text analysis: sentiment, keywords and recommendations.

pub mod config;
pub mod keywords;
pub mod recommendations;
pub mod sentiment;

pub use config::{AnalysisConfig, Lexicon};
pub use recommendations::{RecommendationRule, RecommendationTemplate, RuleContext, DEFAULT_RULES};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::log_debug;
use crate::models::journal::{count_words, reading_time_minutes};
use crate::models::{
    JournalDraft, JournalEntry, JournalUpdate, KeywordSet, MoodLabel, Recommendation,
    TextSentiment,
};

const ENABLE_LOGS: bool = true;

/// Everything derived from one text submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub sentiment: TextSentiment,
    pub keywords: KeywordSet,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub reading_time_minutes: u32,
}

/// Runs the scorer, extractor and recommendation rules over an injected lexicon.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    lexicon: Lexicon,
    config: AnalysisConfig,
    rules: Vec<RecommendationRule>,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::default(), AnalysisConfig::default())
    }
}

impl TextAnalyzer {
    pub fn new(lexicon: Lexicon, config: AnalysisConfig) -> Self {
        Self {
            lexicon,
            config,
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Replaces the rule table; order is evaluation order.
    pub fn with_rules(mut self, rules: Vec<RecommendationRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn rules(&self) -> &[RecommendationRule] {
        &self.rules
    }

    pub fn score_sentiment(&self, text: &str) -> TextSentiment {
        sentiment::score(text, &self.lexicon)
    }

    pub fn extract_keywords(&self, text: &str) -> KeywordSet {
        keywords::extract(text, &self.lexicon, &self.config)
    }

    pub fn recommend(
        &self,
        sentiment: &TextSentiment,
        keywords: &KeywordSet,
        mood: Option<MoodLabel>,
    ) -> Vec<Recommendation> {
        recommendations::recommend(sentiment, keywords, mood, &self.rules, &self.config)
    }

    /// Scores and extracts once, then feeds both into the rules.
    pub fn analyze(&self, text: &str, mood: Option<MoodLabel>) -> TextAnalysis {
        let sentiment = self.score_sentiment(text);
        let keywords = self.extract_keywords(text);
        let recommendations = self.recommend(&sentiment, &keywords, mood);
        let word_count = count_words(text);

        log_debug!(
            "analyzed text: {} words, {} keywords, {} recommendations",
            word_count,
            keywords.len(),
            recommendations.len()
        );

        TextAnalysis {
            sentiment,
            keywords,
            recommendations,
            word_count,
            reading_time_minutes: reading_time_minutes(word_count, self.config.words_per_minute),
        }
    }

    /// Builds a new journal entry with every derived field filled in.
    pub fn compose_journal(
        &self,
        user_id: &str,
        draft: JournalDraft,
        now: DateTime<Utc>,
    ) -> JournalEntry {
        let analysis = self.analyze(&draft.content, draft.mood);
        JournalEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: draft.timestamp.unwrap_or(now),
            title: draft.title,
            content: draft.content,
            mood: draft.mood,
            tags: draft.tags,
            is_private: draft.is_private,
            sentiment: analysis.sentiment,
            keywords: analysis.keywords,
            recommendations: analysis.recommendations,
            word_count: analysis.word_count,
            reading_time_minutes: analysis.reading_time_minutes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an edit. Derived fields are recomputed only when content is replaced.
    pub fn apply_update(&self, entry: &mut JournalEntry, update: JournalUpdate, now: DateTime<Utc>) {
        if update.title.is_some() {
            entry.title = update.title;
        }
        if update.mood.is_some() {
            entry.mood = update.mood;
        }
        if let Some(tags) = update.tags {
            entry.tags = tags;
        }
        if let Some(is_private) = update.is_private {
            entry.is_private = is_private;
        }
        if let Some(content) = update.content {
            let analysis = self.analyze(&content, entry.mood);
            entry.content = content;
            entry.sentiment = analysis.sentiment;
            entry.keywords = analysis.keywords;
            entry.recommendations = analysis.recommendations;
            entry.word_count = analysis.word_count;
            entry.reading_time_minutes = analysis.reading_time_minutes;
        }
        entry.updated_at = now;
    }
}
