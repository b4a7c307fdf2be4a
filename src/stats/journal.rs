use std::collections::HashSet;

use crate::models::{JournalEntry, MoodLabel, SentimentClass};
use crate::stats::helpers::round_half_up;
use crate::stats::types::{period_label, JournalInsightsReport, KeywordCount, SentimentCounts};
use crate::utils::OrderedMap;

const TOP_KEYWORD_LIMIT: usize = 10;

/// Aggregate journal entries already filtered to the trailing `window_days`.
pub fn aggregate(entries: &[JournalEntry], window_days: u32) -> JournalInsightsReport {
    let total_entries = entries.len();
    let total_words: u64 = entries.iter().map(|e| u64::from(e.word_count)).sum();
    let avg_words_per_entry = if total_entries > 0 {
        round_half_up(total_words as f64 / total_entries as f64) as u64
    } else {
        0
    };

    let mut sentiment_counts = SentimentCounts::default();
    let mut keyword_counts: OrderedMap<&str, u32> = OrderedMap::new();
    let mut mood_counts: OrderedMap<MoodLabel, u32> = OrderedMap::new();
    let mut days = HashSet::new();

    for entry in entries {
        match entry.sentiment.dominant() {
            SentimentClass::Positive => sentiment_counts.positive += 1,
            SentimentClass::Negative => sentiment_counts.negative += 1,
            SentimentClass::Neutral => sentiment_counts.neutral += 1,
        }

        // once per entry, however the entry ranked it
        let mut seen = HashSet::new();
        for keyword in entry.keywords.iter() {
            if seen.insert(keyword) {
                keyword_counts.increment(keyword);
            }
        }

        if let Some(mood) = entry.mood {
            mood_counts.increment(mood);
        }

        days.insert(entry.timestamp.date_naive());
    }

    let mut ranked = keyword_counts.into_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top_keywords = ranked
        .into_iter()
        .take(TOP_KEYWORD_LIMIT)
        .map(|(word, count)| KeywordCount {
            word: word.to_string(),
            count,
        })
        .collect();

    let writing_days = days.len();
    let writing_frequency = if window_days == 0 {
        0
    } else {
        round_half_up(100.0 * writing_days as f64 / f64::from(window_days)) as u32
    };

    JournalInsightsReport {
        period: period_label(window_days),
        total_entries,
        total_words,
        avg_words_per_entry,
        sentiment_counts,
        top_keywords,
        mood_counts,
        writing_frequency,
        writing_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TextAnalyzer;
    use crate::models::{JournalDraft, KeywordSet, TextSentiment};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn entry(content: &str, when: DateTime<Utc>) -> JournalEntry {
        let mut draft = JournalDraft::new(content);
        draft.timestamp = Some(when);
        TextAnalyzer::default().compose_journal("u1", draft, when)
    }

    #[test]
    fn empty_window() {
        let report = aggregate(&[], 30);
        assert_eq!(report.total_entries, 0);
        assert_eq!(report.total_words, 0);
        assert_eq!(report.avg_words_per_entry, 0);
        assert_eq!(report.sentiment_counts, SentimentCounts::default());
        assert!(report.top_keywords.is_empty());
        assert_eq!(report.writing_frequency, 0);
        assert_eq!(report.writing_days, 0);
    }

    #[test]
    fn three_distinct_days_in_ten_day_window() {
        let entries = vec![
            entry("morning pages about nothing much", at(1, 8)),
            entry("evening pages about nothing much", at(1, 21)),
            entry("another quiet ordinary day", at(3, 9)),
            entry("writing before bed tonight", at(7, 22)),
        ];
        let report = aggregate(&entries, 10);
        assert_eq!(report.writing_days, 3);
        assert_eq!(report.writing_frequency, 30);
    }

    #[test]
    fn words_and_average() {
        let entries = vec![
            entry("one two three four five", at(2, 10)),
            entry("one two three four five six", at(2, 11)),
        ];
        let report = aggregate(&entries, 30);
        assert_eq!(report.total_words, 11);
        // 5.5 rounds up
        assert_eq!(report.avg_words_per_entry, 6);
    }

    #[test]
    fn sentiment_mix_uses_strict_dominance() {
        let entries = vec![
            entry("happy happy grateful day", at(4, 9)),
            entry("tired and anxious again", at(4, 10)),
            entry("happy but tired", at(4, 11)),
            entry("nothing to report today", at(4, 12)),
        ];
        let report = aggregate(&entries, 30);
        assert_eq!(
            report.sentiment_counts,
            SentimentCounts {
                positive: 1,
                negative: 1,
                neutral: 2,
            }
        );
    }

    #[test]
    fn keywords_count_once_per_entry() {
        let mut a = entry("placeholder content one", at(5, 9));
        a.keywords = KeywordSet::from_ranked(["work", "sleep"]);
        let mut b = entry("placeholder content two", at(5, 10));
        b.keywords = KeywordSet::from_ranked(["sleep", "family"]);
        let c = entry("work work work work work work", at(5, 11));

        let report = aggregate(&[a, b, c], 30);
        let top: Vec<_> = report
            .top_keywords
            .iter()
            .map(|k| (k.word.as_str(), k.count))
            .collect();
        assert_eq!(top, vec![("work", 2), ("sleep", 2), ("family", 1)]);
    }

    #[test]
    fn top_keywords_capped_at_ten() {
        let entries: Vec<_> = (0..3)
            .map(|i| {
                let words: Vec<String> = (0..10).map(|w| format!("topic{i}{w}")).collect();
                let mut e = entry("placeholder content", at(6, 8) + Duration::hours(i));
                e.keywords = KeywordSet::from_ranked(words);
                e
            })
            .collect();
        let report = aggregate(&entries, 30);
        assert_eq!(report.top_keywords.len(), 10);
        assert_eq!(report.top_keywords[0].word, "topic00");
    }

    #[test]
    fn mood_counts_skip_entries_without_mood() {
        let mut a = entry("placeholder content", at(8, 8));
        a.mood = Some(MoodLabel::Calm);
        let b = entry("placeholder content", at(8, 9));
        let mut c = entry("placeholder content", at(8, 10));
        c.mood = Some(MoodLabel::Calm);
        c.sentiment = TextSentiment::UNSCORED;

        let report = aggregate(&[a, b, c], 30);
        assert_eq!(report.mood_counts.get(&MoodLabel::Calm), Some(&2));
        assert_eq!(report.mood_counts.len(), 1);
    }
}
