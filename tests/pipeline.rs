use chrono::{DateTime, Duration, TimeZone, Utc};
use moodlens_lib::models::{JournalDraft, MoodEntry, MoodInput, MoodLabel};
use moodlens_lib::stats;
use moodlens_lib::{
    aggregate_journal_insights, aggregate_mood_stats, extract_keywords, recommend,
    score_sentiment, TextAnalyzer,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn mood_at(label: MoodLabel, intensity: u8, days_ago: i64) -> MoodEntry {
    let now = fixed_now();
    let input = MoodInput {
        timestamp: Some(now - Duration::days(days_ago)),
        ..MoodInput::new(label, intensity)
    };
    MoodEntry::new("user-1", input, now)
}

#[test]
fn text_with_no_lexicon_words_is_unscored() {
    let s = score_sentiment("the meeting moved to thursday afternoon");
    assert_eq!((s.positive, s.negative, s.neutral), (0.5, 0.5, 1.0));
}

#[test]
fn positive_only_text() {
    let s = score_sentiment("Grateful for a wonderful, peaceful walk");
    assert_eq!(s.positive, 1.0);
    assert_eq!(s.negative, 0.0);
}

#[test]
fn keywords_skip_short_and_stop_words() {
    assert!(extract_keywords("").is_empty());
    let keywords = extract_keywords("I was at the gym and then I went home to cook dinner");
    assert_eq!(keywords.as_slice(), ["then", "went", "home", "cook", "dinner"]);
}

#[test]
fn recommendations_follow_rule_order() {
    let sentiment = moodlens_lib::TextSentiment {
        positive: 0.9,
        negative: 0.1,
        neutral: 0.0,
    };
    let keywords = moodlens_lib::KeywordSet::from_ranked(["anxious", "tired"]);
    let titles: Vec<_> = recommend(&sentiment, &keywords, Some(MoodLabel::Happy))
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(
        titles,
        ["Upbeat Playlist", "Breathing Exercise", "Mindfulness Meditation", "Sleep Hygiene Tips"]
    );
}

#[test]
fn empty_mood_window() {
    let report = aggregate_mood_stats(&[], 30);
    assert_eq!(report.total_entries, 0);
    assert_eq!(report.overall_average, 0.0);
    assert_eq!(report.most_common_mood, MoodLabel::Neutral);
    assert_eq!(report.trend, 0.0);
    assert_eq!(report.period, "30 days");
}

#[test]
fn mood_average_and_trend_over_four_days() {
    let entries = vec![
        mood_at(MoodLabel::Sad, 2, 4),
        mood_at(MoodLabel::Neutral, 4, 3),
        mood_at(MoodLabel::Happy, 6, 2),
        mood_at(MoodLabel::VeryHappy, 8, 1),
    ];
    let report = stats::mood::aggregate_at(&entries, 30, fixed_now());
    assert_eq!(report.overall_average, 5.0);
    assert_eq!(report.trend, 4.0);
    assert_eq!(report.daily_averages.len(), 4);
}

#[test]
fn journal_pipeline_end_to_end() {
    let analyzer = TextAnalyzer::default();
    let now = fixed_now();
    let texts = [
        (0, "Felt anxious about work and the deadline, work kept piling up"),
        (0, "An evening of reading left me calm and grateful"),
        (3, "Tired after a busy shift, sleep came late again"),
        (6, "Wonderful weekend hiking with friends, happy and energized"),
    ];

    let entries: Vec<_> = texts
        .iter()
        .map(|(days_ago, text)| {
            let draft = JournalDraft {
                timestamp: Some(now - Duration::days(*days_ago)),
                ..JournalDraft::new(*text)
            };
            analyzer.compose_journal("user-1", draft, now)
        })
        .collect();

    let report = aggregate_journal_insights(&entries, 10);
    assert_eq!(report.total_entries, 4);
    assert_eq!(report.writing_days, 3);
    assert_eq!(report.writing_frequency, 30);

    let counts = report.sentiment_counts;
    assert_eq!(counts.positive + counts.negative + counts.neutral, 4);

    // "work" appears twice in one entry but is counted for that entry once.
    let work = report.top_keywords.iter().find(|k| k.word == "work").unwrap();
    assert_eq!(work.count, 1);
    assert!(report.top_keywords.len() <= 10);
}
