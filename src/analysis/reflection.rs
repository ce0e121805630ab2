//! ReflectionGenerator: runs every concept over a snapshot and ranks the results
//!
//! A concept yields a reflection only when its keywords recur in enough
//! distinct entries. Confidence is the hit ratio, capped so keyword matching
//! never claims near-certainty. Ranking: confidence descending, then hit
//! count descending, then library order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::concepts::{Concept, ConceptLibrary};
use crate::analysis::matcher::{analyze_concept, serialize_keyword_counts, ConceptMatcher, ConceptTally, KeywordCount, MatchedEntry};
use crate::analysis::template::render_template;
use crate::analysis::tokenizer::unigrams;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::journal::entry::Entry;
use crate::journal::store::{snapshot, EntryStore};

// =============================================================================
// Reflection
// =============================================================================

/// An evidence-backed insight about one concept
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub concept_id: String,
    pub concept_name: String,
    pub citation: String,
    pub description: String,
    pub insight_text: String,
    pub why_text: String,
    /// 0-100, never above the configured cap
    pub confidence: u32,
    pub hit_count: usize,
    pub total_entries: usize,
    pub matched_keywords: Vec<String>,
    #[serde(serialize_with = "serialize_keyword_counts")]
    pub keyword_counts: Vec<KeywordCount>,
    /// Every matched entry; display truncation is up to the caller
    pub matched_entries: Vec<MatchedEntry>,
}

impl Reflection {
    pub(crate) fn from_tally(
        concept: &Concept,
        tally: ConceptTally,
        total_entries: usize,
        config: &EngineConfig,
    ) -> Self {
        let hit_count = tally.hit_count();
        let matched_keywords = tally.matched_keywords();
        let confidence = confidence(hit_count, total_entries, config.confidence_cap);

        let hit_str = hit_count.to_string();
        let total_str = total_entries.to_string();
        let insight_text = render_template(
            &concept.insight_template,
            &[("hitCount", hit_str.as_str()), ("totalEntries", total_str.as_str())],
        );

        let quoted = matched_keywords
            .iter()
            .map(|k| format!("\"{}\"", k))
            .collect::<Vec<_>>()
            .join(", ");
        let frequency = frequency_text(&tally.keyword_counts);
        let why_text = render_template(
            &concept.why_explanation,
            &[("matchedKeywords", quoted.as_str()), ("frequency", frequency.as_str())],
        );

        Self {
            concept_id: concept.id.clone(),
            concept_name: concept.name.clone(),
            citation: concept.citation.clone(),
            description: concept.description.clone(),
            insight_text,
            why_text,
            confidence,
            hit_count,
            total_entries,
            matched_keywords,
            keyword_counts: tally.keyword_counts,
            matched_entries: tally.matched_entries,
        }
    }

    /// Entries a keyword appeared in, if it matched at all
    pub fn keyword_count(&self, keyword: &str) -> Option<usize> {
        self.keyword_counts
            .iter()
            .find(|kc| kc.keyword == keyword)
            .map(|kc| kc.count)
    }
}

/// `round(100 * min(cap, hits / total))`
pub fn confidence(hit_count: usize, total_entries: usize, cap: f64) -> u32 {
    if total_entries == 0 {
        return 0;
    }
    let ratio = (hit_count as f64 / total_entries as f64).min(cap);
    (ratio * 100.0).round() as u32
}

/// `"kw" × n` pairs joined with `, `
pub fn frequency_text(counts: &[KeywordCount]) -> String {
    counts
        .iter()
        .map(|kc| format!("\"{}\" × {}", kc.keyword, kc.count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Confidence descending, then hit count descending. Stable.
pub fn rank_reflections(reflections: &mut [Reflection]) {
    reflections.sort_by_key(|r| (Reverse(r.confidence), Reverse(r.hit_count)));
}

/// Unigram vocabulary, counting each word once per entry
pub fn keyword_stats(entries: &[Entry]) -> BTreeMap<String, usize> {
    let mut freq: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        let lower = entry.text.to_lowercase();
        let mut words = unigrams(&lower);
        words.sort_unstable();
        words.dedup();
        for word in words {
            *freq.entry(word.to_string()).or_insert(0) += 1;
        }
    }
    freq
}

// =============================================================================
// ReflectionGenerator
// =============================================================================

/// Concept library compiled into matchers, plus thresholds
#[derive(Debug, Clone)]
pub struct ReflectionGenerator {
    library: ConceptLibrary,
    matchers: Vec<ConceptMatcher>,
    config: EngineConfig,
}

impl ReflectionGenerator {
    pub fn new(library: ConceptLibrary, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let matchers = library
            .concepts()
            .iter()
            .cloned()
            .map(ConceptMatcher::new)
            .collect::<Result<Vec<_>>>()?;

        crate::console_log(&format!(
            "[ReflectionGenerator] Compiled {} concepts",
            matchers.len()
        ));

        Ok(Self {
            library,
            matchers,
            config,
        })
    }

    /// Built-in library with default thresholds
    pub fn builtin() -> Result<Self> {
        Self::new(ConceptLibrary::builtin()?, EngineConfig::default())
    }

    pub fn library(&self) -> &ConceptLibrary {
        &self.library
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Strongest reflection for the store's entries
    pub fn generate_reflection(&self, store: &dyn EntryStore) -> Option<Reflection> {
        self.best_reflection_for(&snapshot(store))
    }

    /// Every qualifying reflection, ranked
    pub fn generate_all_reflections(&self, store: &dyn EntryStore) -> Vec<Reflection> {
        self.reflections_for(&snapshot(store))
    }

    /// Word frequencies over the store's entries
    pub fn keyword_stats(&self, store: &dyn EntryStore) -> BTreeMap<String, usize> {
        keyword_stats(&snapshot(store))
    }

    /// Strongest reflection for a snapshot
    pub fn best_reflection_for(&self, entries: &[Entry]) -> Option<Reflection> {
        self.reflections_for(entries).into_iter().next()
    }

    /// Ranked reflections for a snapshot; empty below the unlock threshold
    pub fn reflections_for(&self, entries: &[Entry]) -> Vec<Reflection> {
        if entries.len() < self.config.required_entries {
            return Vec::new();
        }

        let mut results: Vec<Reflection> = self
            .matchers
            .iter()
            .filter_map(|m| analyze_concept(m, entries, &self.config))
            .collect();
        rank_reflections(&mut results);

        crate::console_log(&format!(
            "[ReflectionGenerator] {} of {} concepts cleared threshold over {} entries",
            results.len(),
            self.matchers.len(),
            entries.len()
        ));

        results
    }
}
