pub mod analysis;
mod cli;
pub mod db;
pub mod models;
pub mod settings;
pub mod stats;
pub mod utils;
pub mod validation;

use std::sync::OnceLock;

use clap::Parser;

pub use analysis::{AnalysisConfig, Lexicon, TextAnalysis, TextAnalyzer};
pub use db::Database;
pub use models::{
    JournalEntry, KeywordSet, MoodEntry, MoodLabel, Recommendation, TextSentiment,
};
pub use settings::SettingsStore;
pub use stats::{JournalInsightsReport, MoodStatsReport};

fn default_analyzer() -> &'static TextAnalyzer {
    static ANALYZER: OnceLock<TextAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(TextAnalyzer::default)
}

/// Scores `text` against the built-in lexicon.
pub fn score_sentiment(text: &str) -> TextSentiment {
    default_analyzer().score_sentiment(text)
}

/// Top keywords of `text` using the built-in stop words and limits.
pub fn extract_keywords(text: &str) -> KeywordSet {
    default_analyzer().extract_keywords(text)
}

pub fn recommend(
    sentiment: &TextSentiment,
    keywords: &KeywordSet,
    mood: Option<MoodLabel>,
) -> Vec<Recommendation> {
    default_analyzer().recommend(sentiment, keywords, mood)
}

pub fn aggregate_mood_stats(entries: &[MoodEntry], window_days: u32) -> MoodStatsReport {
    stats::mood::aggregate(entries, window_days)
}

pub fn aggregate_journal_insights(
    entries: &[JournalEntry],
    window_days: u32,
) -> JournalInsightsReport {
    stats::journal::aggregate(entries, window_days)
}

pub fn run() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = cli::Cli::parse();
    log::info!("moodlens starting up...");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(cli::dispatch(args))
}
