use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{MoodEntry, MoodLabel};
use crate::stats::helpers::{ceil_div, mean, round_to_tenth};
use crate::stats::types::{period_label, DailyAverage, MoodStatsReport, WeeklyBucket};
use crate::utils::OrderedMap;

/// Aggregate mood entries already filtered to the trailing `window_days`.
pub fn aggregate(entries: &[MoodEntry], window_days: u32) -> MoodStatsReport {
    aggregate_at(entries, window_days, Utc::now())
}

/// Same as [`aggregate`] with an explicit reference time for week buckets.
pub fn aggregate_at(entries: &[MoodEntry], window_days: u32, now: DateTime<Utc>) -> MoodStatsReport {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.timestamp);

    let week_us = micros(Duration::days(7));

    // per label: (intensity sum, count)
    let mut per_label: OrderedMap<MoodLabel, (u32, u32)> = OrderedMap::new();
    let mut weekly_data: BTreeMap<i64, WeeklyBucket> = BTreeMap::new();
    let mut daily: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();

    for entry in &sorted {
        let intensity = u32::from(entry.intensity);

        let label = per_label.get_or_insert_with(entry.mood, || (0, 0));
        label.0 += intensity;
        label.1 += 1;

        let week = ceil_div(micros(now - entry.timestamp), week_us);
        let bucket = weekly_data.entry(week).or_default();
        bucket.total += intensity;
        bucket.count += 1;

        let day = daily.entry(entry.timestamp.date_naive()).or_insert((0, 0));
        day.0 += intensity;
        day.1 += 1;
    }

    let mood_counts = per_label.map_values(|&(_, count)| count);
    let mood_averages = per_label.map_values(|&(sum, count)| sum as f64 / count as f64);

    let overall_average = mean(sorted.iter().map(|e| f64::from(e.intensity)));

    MoodStatsReport {
        period: period_label(window_days),
        total_entries: sorted.len(),
        overall_average: round_to_tenth(overall_average),
        most_common_mood: most_common_mood(&mood_counts),
        trend: round_to_tenth(trend(&sorted)),
        mood_counts,
        mood_averages,
        weekly_data,
        daily_averages: daily
            .into_iter()
            .map(|(date, (total, count))| DailyAverage {
                date,
                average: round_to_tenth(total as f64 / count as f64),
            })
            .collect(),
    }
}

// Full precision before the ceiling; stored timestamps keep microseconds.
fn micros(delta: Duration) -> i64 {
    delta
        .num_microseconds()
        .unwrap_or_else(|| delta.num_milliseconds().saturating_mul(1000))
}

/// Starts from neutral and only moves on a strictly greater count, so the
/// earliest-inserted label wins ties.
fn most_common_mood(counts: &OrderedMap<MoodLabel, u32>) -> MoodLabel {
    let mut best = MoodLabel::Neutral;
    let mut best_count = counts.get(&MoodLabel::Neutral).copied().unwrap_or(0);
    for (label, &count) in counts.iter() {
        if count > best_count {
            best = *label;
            best_count = count;
        }
    }
    best
}

/// Mean of the later half minus mean of the earlier half, split at `floor(n / 2)`.
fn trend(sorted: &[&MoodEntry]) -> f64 {
    let (first, second) = sorted.split_at(sorted.len() / 2);
    let first_avg = mean(first.iter().map(|e| f64::from(e.intensity)));
    let second_avg = mean(second.iter().map(|e| f64::from(e.intensity)));
    second_avg - first_avg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodInput;
    use chrono::TimeZone;

    fn entry(label: MoodLabel, intensity: u8, at: DateTime<Utc>) -> MoodEntry {
        let mut input = MoodInput::new(label, intensity);
        input.timestamp = Some(at);
        MoodEntry::new("u1", input, at)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_window() {
        let report = aggregate_at(&[], 30, now());
        assert_eq!(report.overall_average, 0.0);
        assert_eq!(report.most_common_mood, MoodLabel::Neutral);
        assert_eq!(report.trend, 0.0);
        assert_eq!(report.total_entries, 0);
        assert!(report.mood_counts.is_empty());
        assert!(report.daily_averages.is_empty());
        assert!(report.weekly_data.is_empty());
        assert_eq!(report.period, "30 days");
    }

    #[test]
    fn average_and_trend_over_four_days() {
        let base = now() - Duration::days(4);
        // supplied out of order; the trend is computed over timestamp order
        let entries = vec![
            entry(MoodLabel::Happy, 6, base + Duration::days(2)),
            entry(MoodLabel::Sad, 2, base),
            entry(MoodLabel::Happy, 8, base + Duration::days(3)),
            entry(MoodLabel::Calm, 4, base + Duration::days(1)),
        ];

        let report = aggregate_at(&entries, 30, now());
        assert_eq!(report.overall_average, 5.0);
        assert_eq!(report.trend, 4.0);
        assert_eq!(report.daily_averages.len(), 4);
        assert!(report
            .daily_averages
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
        assert_eq!(report.daily_averages[0].average, 2.0);
    }

    #[test]
    fn single_entry_trend_uses_empty_first_half() {
        let report = aggregate_at(&[entry(MoodLabel::Calm, 7, now())], 7, now());
        // first half is empty and counts as 0
        assert_eq!(report.trend, 7.0);
    }

    #[test]
    fn per_label_counts_and_averages() {
        let t = now() - Duration::hours(1);
        let entries = vec![
            entry(MoodLabel::Anxious, 3, t),
            entry(MoodLabel::Happy, 8, t + Duration::minutes(1)),
            entry(MoodLabel::Anxious, 6, t + Duration::minutes(2)),
        ];
        let report = aggregate_at(&entries, 30, now());

        let counts: Vec<_> = report.mood_counts.iter().map(|(l, c)| (*l, *c)).collect();
        assert_eq!(counts, vec![(MoodLabel::Anxious, 2), (MoodLabel::Happy, 1)]);
        assert_eq!(report.mood_averages.get(&MoodLabel::Anxious), Some(&4.5));
        assert_eq!(report.mood_averages.get(&MoodLabel::Happy), Some(&8.0));
        assert_eq!(report.most_common_mood, MoodLabel::Anxious);
    }

    #[test]
    fn earliest_label_wins_ties() {
        let t = now() - Duration::days(1);
        let entries = vec![
            entry(MoodLabel::Excited, 5, t),
            entry(MoodLabel::Sad, 5, t + Duration::minutes(1)),
        ];
        let report = aggregate_at(&entries, 30, now());
        assert_eq!(report.most_common_mood, MoodLabel::Excited);
    }

    #[test]
    fn neutral_accumulator_keeps_ties() {
        let t = now() - Duration::days(1);
        let entries = vec![
            entry(MoodLabel::Happy, 5, t),
            entry(MoodLabel::Neutral, 5, t + Duration::minutes(1)),
        ];
        let report = aggregate_at(&entries, 30, now());
        assert_eq!(report.most_common_mood, MoodLabel::Neutral);
    }

    #[test]
    fn weekly_buckets_are_raw_accumulators() {
        let entries = vec![
            entry(MoodLabel::Happy, 4, now()),
            entry(MoodLabel::Happy, 6, now() - Duration::days(3)),
            entry(MoodLabel::Sad, 2, now() - Duration::days(7)),
            entry(MoodLabel::Sad, 3, now() - Duration::days(8)),
        ];
        let report = aggregate_at(&entries, 30, now());

        assert_eq!(report.weekly_data.get(&0), Some(&WeeklyBucket { total: 4, count: 1 }));
        assert_eq!(report.weekly_data.get(&1), Some(&WeeklyBucket { total: 8, count: 2 }));
        assert_eq!(report.weekly_data.get(&2), Some(&WeeklyBucket { total: 3, count: 1 }));
    }

    #[test]
    fn sub_millisecond_age_past_a_week_starts_the_next_bucket() {
        let at = now() - Duration::days(7) - Duration::microseconds(500);
        let report = aggregate_at(&[entry(MoodLabel::Calm, 5, at)], 30, now());
        let keys: Vec<_> = report.weekly_data.keys().copied().collect();
        assert_eq!(keys, [2]);
    }

    #[test]
    fn daily_average_is_rounded() {
        let day = Utc.with_ymd_and_hms(2024, 3, 30, 8, 0, 0).unwrap();
        let entries = vec![
            entry(MoodLabel::Happy, 7, day),
            entry(MoodLabel::Happy, 7, day + Duration::hours(2)),
            entry(MoodLabel::Sad, 6, day + Duration::hours(4)),
        ];
        let report = aggregate_at(&entries, 30, now());
        assert_eq!(report.daily_averages.len(), 1);
        assert_eq!(report.daily_averages[0].average, 6.7);
    }
}
