use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::MoodLabel;
use crate::utils::OrderedMap;

/// Raw accumulator for one week bucket; consumers divide if they need a mean.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct WeeklyBucket {
    pub total: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodStatsReport {
    pub period: String,
    pub total_entries: usize,
    pub overall_average: f64,
    pub most_common_mood: MoodLabel,
    pub trend: f64,
    pub mood_counts: OrderedMap<MoodLabel, u32>,
    pub mood_averages: OrderedMap<MoodLabel, f64>,
    /// Keyed by `ceil((now - timestamp) / 7 days)`.
    pub weekly_data: BTreeMap<i64, WeeklyBucket>,
    pub daily_averages: Vec<DailyAverage>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalInsightsReport {
    pub period: String,
    pub total_entries: usize,
    pub total_words: u64,
    pub avg_words_per_entry: u64,
    pub sentiment_counts: SentimentCounts,
    pub top_keywords: Vec<KeywordCount>,
    pub mood_counts: OrderedMap<MoodLabel, u32>,
    /// Percent of window days with at least one entry.
    pub writing_frequency: u32,
    pub writing_days: usize,
}

/// `"<n> days"`, as shown next to each report.
pub fn period_label(window_days: u32) -> String {
    format!("{window_days} days")
}
