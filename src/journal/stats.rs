//! Timeline statistics over an entry snapshot

use serde::{Deserialize, Serialize};

use crate::journal::entry::Entry;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Summary figures shown above the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: usize,
    pub total_words: usize,
    /// Whole days between the oldest and newest entry
    pub day_span: i64,
}

/// Whitespace-separated words in the trimmed text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compute stats over entries sorted newest first
pub fn journal_stats(entries: &[Entry]) -> JournalStats {
    let total_words = entries.iter().map(|e| word_count(&e.text)).sum();

    let day_span = match (entries.first(), entries.last()) {
        (Some(newest), Some(oldest)) if entries.len() >= 2 => {
            match (newest.parsed_timestamp(), oldest.parsed_timestamp()) {
                (Some(n), Some(o)) => (n - o).num_milliseconds().div_euclid(MILLIS_PER_DAY),
                _ => 0,
            }
        }
        _ => 0,
    };

    JournalStats {
        total_entries: entries.len(),
        total_words,
        day_span,
    }
}

/// Case-insensitive text search; a blank query matches everything
pub fn search_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    if query.trim().is_empty() {
        return entries.iter().collect();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.text.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str, ts: &str) -> Entry {
        Entry::new(id, text, ts)
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n "), 0);
        assert_eq!(word_count("  one two\tthree\nfour "), 4);
    }

    #[test]
    fn test_journal_stats() {
        let entries = vec![
            entry("c", "three little words", "2025-01-10T20:00:00.000Z"),
            entry("b", "two words", "2025-01-05T09:00:00.000Z"),
            entry("a", "one", "2025-01-01T21:00:00.000Z"),
        ];
        let stats = journal_stats(&entries);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_words, 6);
        // 8 days 23 hours floors to 8
        assert_eq!(stats.day_span, 8);
    }

    #[test]
    fn test_journal_stats_small_or_unparseable() {
        assert_eq!(journal_stats(&[]), JournalStats::default());

        let single = vec![entry("a", "hi", "2025-01-01T21:00:00.000Z")];
        assert_eq!(journal_stats(&single).day_span, 0);

        let broken = vec![
            entry("a", "hi", "2025-01-01T21:00:00.000Z"),
            entry("b", "hi", "whenever"),
        ];
        assert_eq!(journal_stats(&broken).day_span, 0);
    }

    #[test]
    fn test_search_entries() {
        let entries = vec![
            entry("a", "Walked by the Sea today", "2025-01-02T00:00:00Z"),
            entry("b", "stayed inside", "2025-01-01T00:00:00Z"),
        ];

        assert_eq!(search_entries(&entries, "  ").len(), 2);

        let hits = search_entries(&entries, "SEA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");

        assert!(search_entries(&entries, "mountain").is_empty());
    }
}
