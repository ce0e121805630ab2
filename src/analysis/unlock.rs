//! Unlock gate: reflections need a minimum number of entries

use serde::{Deserialize, Serialize};

use crate::journal::store::{snapshot, EntryStore};

/// Whether reflections are available yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockStatus {
    pub unlocked: bool,
    pub reason: String,
    pub entries_count: usize,
    /// Present only while locked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_entries: Option<usize>,
}

/// Gate on an entry count
pub fn unlock_status(entries_count: usize, required_entries: usize) -> UnlockStatus {
    if entries_count < required_entries {
        return UnlockStatus {
            unlocked: false,
            reason: format!("Write at least {} entries to unlock reflections.", required_entries),
            entries_count,
            required_entries: Some(required_entries),
        };
    }

    UnlockStatus {
        unlocked: true,
        reason: "Reflections unlocked!".to_string(),
        entries_count,
        required_entries: None,
    }
}

/// Gate on the store's current entries
pub fn check_reflection_unlock(store: &dyn EntryStore, required_entries: usize) -> UnlockStatus {
    unlock_status(snapshot(store).len(), required_entries)
}
