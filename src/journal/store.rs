//! Entry Store: the collaborator analysis reads entries from
//!
//! The engine never reaches for ambient state. Every analysis call receives
//! an `EntryStore`, takes one snapshot via [`snapshot`] and works on that.

use std::cmp::Reverse;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{PensieveError, Result};
use crate::journal::entry::Entry;

/// Storage contract for journal entries
pub trait EntryStore {
    /// All entries, newest first
    fn list(&self) -> Result<Vec<Entry>>;

    /// Insert a new entry, or replace text/timestamp of the entry with the same id
    fn upsert(&mut self, entry: Entry);

    /// Remove an entry by id. Returns true if one was removed
    fn delete(&mut self, id: &str) -> bool;
}

/// Read the store once for an analysis pass.
///
/// A store that cannot be read counts as empty; the failure is logged and
/// never reaches the caller.
pub fn snapshot(store: &dyn EntryStore) -> Vec<Entry> {
    match store.list() {
        Ok(entries) => entries,
        Err(e) => {
            crate::console_error(&format!("[EntryStore] {} - treating as zero entries", e));
            Vec::new()
        }
    }
}

/// Sort newest first. Stable; entries with unparseable timestamps go last.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| Reverse(e.parsed_timestamp()));
}

// =============================================================================
// MemoryEntryStore
// =============================================================================

/// In-memory store keeping entries in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryEntryStore {
    entries: Vec<Entry>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Load from the persisted JSON array.
    ///
    /// Blank or malformed input yields an empty store.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::new();
        }
        match Self::try_from_json(raw) {
            Ok(store) => store,
            Err(e) => {
                crate::console_error(&format!("[EntryStore] {} - starting empty", e));
                Self::new()
            }
        }
    }

    /// Strict variant of [`MemoryEntryStore::from_json`]
    pub fn try_from_json(raw: &str) -> Result<Self> {
        let entries: Vec<Entry> = serde_json::from_str(raw)
            .map_err(|e| PensieveError::InvalidEntries(e.to_string()))?;
        Ok(Self { entries })
    }

    /// Serialize in insertion order
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.entries).map_err(|e| PensieveError::Serialization(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl EntryStore for MemoryEntryStore {
    fn list(&self) -> Result<Vec<Entry>> {
        let mut entries = self.entries.clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn upsert(&mut self, entry: Entry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                existing.text = entry.text;
                existing.timestamp = entry.timestamp;
            }
            None => self.entries.push(entry),
        }
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

// =============================================================================
// Writer helpers
// =============================================================================

/// Autosave a draft.
///
/// Text is trimmed before saving; a blank draft is not saved. Returns true
/// when the store was written.
pub fn save_draft(store: &mut dyn EntryStore, id: &str, text: &str, now: DateTime<Utc>) -> bool {
    let text = text.trim();
    if text.is_empty() || id.is_empty() {
        return false;
    }
    store.upsert(Entry::new(id, text, format_timestamp(now)));
    true
}

/// `2025-03-01T08:30:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// New entry id: `entry_<unix millis>_<7 base36 chars>`
pub fn generate_id() -> Result<String> {
    generate_id_at(Utc::now())
}

pub(crate) fn generate_id_at(now: DateTime<Utc>) -> Result<String> {
    let mut bytes = [0u8; ID_SUFFIX_LEN];
    getrandom::fill(&mut bytes).map_err(|e| PensieveError::IdGeneration(e.to_string()))?;

    let suffix: String = bytes
        .iter()
        .map(|b| BASE36[(*b as usize) % BASE36.len()] as char)
        .collect();

    Ok(format!("entry_{}_{}", now.timestamp_millis(), suffix))
}
