use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use serde::Serialize;

use crate::analysis::TextAnalyzer;
use crate::db::{
    connection::Database,
    helpers::{
        format_datetime, from_json, like_pattern, parse_datetime, parse_optional_mood, to_json,
        to_u32,
    },
};
use crate::models::{JournalEntry, JournalUpdate, MoodLabel, TextSentiment};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

const JOURNAL_COLUMNS: &str = "id, user_id, timestamp, title, content, mood, tags, is_private,
     sentiment_positive, sentiment_negative, sentiment_neutral, keywords, recommendations,
     word_count, reading_time_minutes, created_at, updated_at";

/// Filters for listing journal entries. `page` is 1-based.
#[derive(Debug, Clone)]
pub struct JournalQuery {
    pub mood: Option<MoodLabel>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Case-insensitive match against title, content and tags.
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for JournalQuery {
    fn default() -> Self {
        Self {
            mood: None,
            start: None,
            end: None,
            search: None,
            page: 1,
            limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_entries: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalPage {
    pub entries: Vec<JournalEntry>,
    pub pagination: Pagination,
}

fn row_to_journal(row: &Row) -> Result<JournalEntry> {
    let timestamp: String = row.get("timestamp")?;
    let tags: String = row.get("tags")?;
    let keywords: String = row.get("keywords")?;
    let recommendations: String = row.get("recommendations")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(JournalEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        title: row.get("title")?,
        content: row.get("content")?,
        mood: parse_optional_mood(row.get("mood")?)?,
        tags: from_json(&tags, "tags")?,
        is_private: row.get("is_private")?,
        sentiment: TextSentiment {
            positive: row.get("sentiment_positive")?,
            negative: row.get("sentiment_negative")?,
            neutral: row.get("sentiment_neutral")?,
        },
        keywords: from_json(&keywords, "keywords")?,
        recommendations: from_json(&recommendations, "recommendations")?,
        word_count: to_u32(row.get("word_count")?, "word_count")?,
        reading_time_minutes: to_u32(row.get("reading_time_minutes")?, "reading_time_minutes")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn collect_journals(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<JournalEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(row_to_journal(row)?);
    }
    Ok(entries)
}

fn find_journal(conn: &Connection, user_id: &str, journal_id: &str) -> Result<Option<JournalEntry>> {
    let sql = format!("SELECT {JOURNAL_COLUMNS} FROM journals WHERE id = ?1 AND user_id = ?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![journal_id, user_id], |row| Ok(row_to_journal(row)))
        .optional()?;
    found.transpose()
}

fn write_journal(conn: &Connection, entry: &JournalEntry) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO journals (id, user_id, timestamp, title, content, mood, tags, is_private,
             sentiment_positive, sentiment_negative, sentiment_neutral, keywords, recommendations,
             word_count, reading_time_minutes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            entry.id,
            entry.user_id,
            format_datetime(&entry.timestamp),
            entry.title,
            entry.content,
            entry.mood.map(|m| m.as_str()),
            to_json(&entry.tags, "tags")?,
            entry.is_private,
            entry.sentiment.positive,
            entry.sentiment.negative,
            entry.sentiment.neutral,
            to_json(&entry.keywords, "keywords")?,
            to_json(&entry.recommendations, "recommendations")?,
            entry.word_count,
            entry.reading_time_minutes,
            format_datetime(&entry.created_at),
            format_datetime(&entry.updated_at),
        ],
    )?;
    Ok(())
}

/// WHERE clause and its positional values for a [`JournalQuery`].
fn journal_filter(user_id: String, query: &JournalQuery) -> (String, Vec<Box<dyn ToSql + Send>>) {
    let mut clauses = vec!["user_id = ?".to_string()];
    let mut values: Vec<Box<dyn ToSql + Send>> = vec![Box::new(user_id)];

    if let Some(mood) = query.mood {
        clauses.push("mood = ?".into());
        values.push(Box::new(mood.as_str()));
    }
    if let Some(start) = &query.start {
        clauses.push("timestamp >= ?".into());
        values.push(Box::new(format_datetime(start)));
    }
    if let Some(end) = &query.end {
        clauses.push("timestamp <= ?".into());
        values.push(Box::new(format_datetime(end)));
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        clauses.push(
            "(title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\'
              OR EXISTS (SELECT 1 FROM json_each(journals.tags) WHERE value LIKE ? ESCAPE '\\'))"
                .into(),
        );
        let pattern = like_pattern(search);
        for _ in 0..3 {
            values.push(Box::new(pattern.clone()));
        }
    }

    (clauses.join(" AND "), values)
}

impl Database {
    pub async fn insert_journal(&self, entry: &JournalEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            write_journal(conn, &record)?;
            // content is never logged
            log_info!(
                "Stored journal entry {} ({} words, {} recommendations)",
                record.id,
                record.word_count,
                record.recommendations.len()
            );
            Ok(())
        })
        .await
    }

    pub async fn get_journal(&self, user_id: &str, journal_id: &str) -> Result<Option<JournalEntry>> {
        let user_id = user_id.to_string();
        let journal_id = journal_id.to_string();
        self.execute(move |conn| find_journal(conn, &user_id, &journal_id))
            .await
    }

    /// Apply a partial edit; a new `content` re-runs the analyzer before the write.
    pub async fn update_journal(
        &self,
        user_id: &str,
        journal_id: &str,
        update: JournalUpdate,
        analyzer: &TextAnalyzer,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry> {
        let user_id = user_id.to_string();
        let journal_id = journal_id.to_string();
        let analyzer = analyzer.clone();
        self.execute(move |conn| {
            let mut entry = find_journal(conn, &user_id, &journal_id)?
                .ok_or_else(|| anyhow!("Journal entry not found"))?;
            analyzer.apply_update(&mut entry, update, now);
            write_journal(conn, &entry)?;
            log_info!("Updated journal entry {}", entry.id);
            Ok(entry)
        })
        .await
    }

    pub async fn delete_journal(&self, user_id: &str, journal_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let journal_id = journal_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM journals WHERE id = ?1 AND user_id = ?2",
                params![journal_id, user_id],
            )?;
            if rows_affected == 0 {
                return Err(anyhow!("Journal entry not found"));
            }
            Ok(())
        })
        .await
    }

    /// Newest first, paginated.
    pub async fn list_journals(&self, user_id: &str, query: JournalQuery) -> Result<JournalPage> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let page = query.page.max(1);
            let limit = query.limit.max(1);
            let offset = (page - 1)
                .checked_mul(limit)
                .ok_or_else(|| anyhow!("Page {page} is out of range for a limit of {limit}"))?;

            let (filter, values) = journal_filter(user_id, &query);
            let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref() as &dyn ToSql).collect();

            let total: u32 = conn.query_row(
                &format!("SELECT COUNT(*) FROM journals WHERE {filter}"),
                refs.as_slice(),
                |row| row.get(0),
            )?;

            let mut page_refs = refs.clone();
            page_refs.push(&limit);
            page_refs.push(&offset);
            let entries = collect_journals(
                conn,
                &format!(
                    "SELECT {JOURNAL_COLUMNS} FROM journals WHERE {filter}
                     ORDER BY timestamp DESC LIMIT ? OFFSET ?"
                ),
                page_refs.as_slice(),
            )?;

            Ok(JournalPage {
                entries,
                pagination: Pagination {
                    current_page: page,
                    total_pages: total.div_ceil(limit),
                    total_entries: total,
                    has_next: offset.saturating_add(limit) < total,
                    has_prev: page > 1,
                },
            })
        })
        .await
    }

    /// Entries in `[now - window_days, now]`, oldest first.
    pub async fn journals_in_window(
        &self,
        user_id: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let start = format_datetime(&(now - Duration::days(i64::from(window_days))));
            let end = format_datetime(&now);
            let sql = format!(
                "SELECT {JOURNAL_COLUMNS} FROM journals
                 WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp <= ?3
                 ORDER BY timestamp ASC"
            );
            let entries = collect_journals(conn, &sql, &[&user_id, &start, &end])?;
            log_debug!(
                "Loaded {} journal entries for a {} day window",
                entries.len(),
                window_days
            );
            Ok(entries)
        })
        .await
    }
}
