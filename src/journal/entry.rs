//! Entry: one journal submission
//!
//! Entries are owned by the store; analysis only ever reads snapshots.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journal entry as persisted by the writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    /// Entry body. A record without text loads as an empty entry.
    #[serde(default)]
    pub text: String,
    /// ISO-8601 timestamp of the last save. Missing or unparseable values sort last.
    #[serde(default)]
    pub timestamp: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Parsed timestamp, or None when it is not a recognizable ISO-8601 value
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// First `max_chars` characters of the text
    pub fn preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts full RFC 3339 (`2025-01-02T10:00:00.000Z`), a local datetime
/// without offset (read as UTC) and a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
