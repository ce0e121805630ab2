//! Emotion trends: coarse keyword categories for the timeline dashboard
//!
//! Plain substring containment on the lowercased text, no tokenization.
//! An entry counts once per category however many keywords it contains.

use std::sync::OnceLock;

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

use crate::journal::entry::Entry;
use crate::journal::store::{snapshot, EntryStore};

/// A fixed emotion category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub color: &'static str,
}

pub const EMOTION_CATEGORIES: [EmotionCategory; 4] = [
    EmotionCategory {
        name: "Anxiety",
        keywords: &["worry", "uncertain", "stress", "control", "what if"],
        color: "#f59e0b",
    },
    EmotionCategory {
        name: "Sadness",
        keywords: &["lonely", "down", "tired", "empty"],
        color: "#6b7280",
    },
    EmotionCategory {
        name: "Growth",
        keywords: &["learn", "improve", "future", "progress", "grow"],
        color: "#2dd4bf",
    },
    EmotionCategory {
        name: "Gratitude",
        keywords: &["thankful", "grateful", "appreciate", "blessed"],
        color: "#5eead4",
    },
];

/// Entries per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTrend {
    pub name: String,
    pub color: String,
    pub count: usize,
}

/// Category table compiled into one automaton per category
pub struct EmotionTrendAnalyzer {
    categories: Vec<(EmotionCategory, AhoCorasick)>,
}

static DEFAULT_ANALYZER: OnceLock<EmotionTrendAnalyzer> = OnceLock::new();

impl EmotionTrendAnalyzer {
    fn new() -> Self {
        let categories = EMOTION_CATEGORIES
            .iter()
            .map(|cat| {
                let automaton = AhoCorasick::new(cat.keywords).expect("emotion keywords are valid patterns");
                (*cat, automaton)
            })
            .collect();
        Self { categories }
    }

    /// Shared analyzer for the fixed table
    pub fn shared() -> &'static Self {
        DEFAULT_ANALYZER.get_or_init(Self::new)
    }

    /// One trend per category, most frequent first; ties keep table order
    pub fn analyze(&self, entries: &[Entry]) -> Vec<EmotionTrend> {
        let mut counts = vec![0usize; self.categories.len()];

        for entry in entries {
            let lower = entry.text.to_lowercase();
            for (i, (_, automaton)) in self.categories.iter().enumerate() {
                if automaton.is_match(&lower) {
                    counts[i] += 1;
                }
            }
        }

        let mut trends: Vec<EmotionTrend> = self
            .categories
            .iter()
            .zip(counts)
            .map(|((cat, _), count)| EmotionTrend {
                name: cat.name.to_string(),
                color: cat.color.to_string(),
                count,
            })
            .collect();

        // Stable: equal counts stay in table order
        trends.sort_by(|a, b| b.count.cmp(&a.count));
        trends
    }
}

/// Trends over a snapshot
pub fn analyze_emotion_trends(entries: &[Entry]) -> Vec<EmotionTrend> {
    EmotionTrendAnalyzer::shared().analyze(entries)
}

/// Trends over the store's entries
pub fn emotion_trends(store: &dyn EntryStore) -> Vec<EmotionTrend> {
    analyze_emotion_trends(&snapshot(store))
}
