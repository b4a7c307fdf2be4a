//! Read-only window aggregates over mood and journal history.
//!
//! Callers supply entries already filtered to `[now - window_days, now]`.
//! Nothing here mutates entries or fails on empty input.

mod helpers;
pub mod journal;
pub mod mood;
mod types;

pub use types::{
    DailyAverage, JournalInsightsReport, KeywordCount, MoodStatsReport, SentimentCounts,
    WeeklyBucket,
};
