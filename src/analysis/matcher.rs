//! ConceptMatcher: which of a concept's keywords occur in each entry
//!
//! A keyword matches an entry when its lowercase form is an exact token of
//! the entry (unigram, bigram or whole text) or a substring of the lowercased
//! text. The substring side runs through one Aho-Corasick automaton per
//! concept with overlapping search, so every contained keyword is reported.
//!
//! Counting is presence-based: a keyword counts once per entry however many
//! times it appears there.

use std::collections::{HashMap, HashSet};

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::{Deserialize, Serialize, Serializer};

use crate::analysis::concepts::Concept;
use crate::analysis::reflection::Reflection;
use crate::analysis::tokenizer::TokenSet;
use crate::config::EngineConfig;
use crate::error::{PensieveError, Result};
use crate::journal::entry::Entry;

// =============================================================================
// Types
// =============================================================================

/// One entry that matched at least one keyword of a concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedEntry {
    pub entry_id: String,
    pub timestamp: String,
    pub preview: String,
    /// Keywords in concept order
    pub matched_keywords: Vec<String>,
}

/// Number of entries a keyword appeared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Serialize keyword counts as an object, keeping first-matched order
pub(crate) fn serialize_keyword_counts<S: Serializer>(
    counts: &[KeywordCount],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(counts.iter().map(|kc| (kc.keyword.as_str(), kc.count)))
}

/// Aggregated matches of one concept over an entry snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConceptTally {
    /// In input entry order, one per distinct entry id
    pub matched_entries: Vec<MatchedEntry>,
    /// In first-matched order
    pub keyword_counts: Vec<KeywordCount>,
}

impl ConceptTally {
    /// Distinct entries with at least one match
    pub fn hit_count(&self) -> usize {
        self.matched_entries.len()
    }

    /// Keywords of the kept matched entries, first-matched order.
    ///
    /// Read from `matched_entries`, so keywords only seen in a record that a
    /// later duplicate id replaced are left out.
    pub fn matched_keywords(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.matched_entries
            .iter()
            .flat_map(|m| m.matched_keywords.iter())
            .filter(|kw| seen.insert(*kw))
            .cloned()
            .collect()
    }

    pub fn count_of(&self, keyword: &str) -> Option<usize> {
        self.keyword_counts
            .iter()
            .find(|kc| kc.keyword == keyword)
            .map(|kc| kc.count)
    }

    fn bump(&mut self, keyword: &str) {
        match self.keyword_counts.iter_mut().find(|kc| kc.keyword == keyword) {
            Some(kc) => kc.count += 1,
            None => self.keyword_counts.push(KeywordCount {
                keyword: keyword.to_string(),
                count: 1,
            }),
        }
    }
}

// =============================================================================
// Single-keyword check
// =============================================================================

/// Exact-token or substring test for one keyword
pub fn keyword_matches(keyword: &str, tokens: &TokenSet, raw_lower_text: &str) -> bool {
    let keyword = keyword.to_lowercase();
    tokens.contains_token(&keyword) || raw_lower_text.contains(&keyword)
}

// =============================================================================
// ConceptMatcher
// =============================================================================

/// Compiled keyword matcher for one concept
#[derive(Debug, Clone)]
pub struct ConceptMatcher {
    concept: Concept,
    lower_keywords: Vec<String>,
    automaton: AhoCorasick,
}

impl ConceptMatcher {
    pub fn new(concept: Concept) -> Result<Self> {
        let lower_keywords: Vec<String> = concept.keywords.iter().map(|k| k.to_lowercase()).collect();

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&lower_keywords)
            .map_err(|e| {
                PensieveError::InvalidConceptLibrary(format!(
                    "concept '{}' keyword automaton: {}",
                    concept.id, e
                ))
            })?;

        Ok(Self {
            concept,
            lower_keywords,
            automaton,
        })
    }

    pub fn concept(&self) -> &Concept {
        &self.concept
    }

    /// Indices (concept order) of keywords matching the tokenized entry
    pub fn matching_keyword_indices(&self, tokens: &TokenSet) -> Vec<usize> {
        let mut hit = vec![false; self.lower_keywords.len()];

        for m in self.automaton.find_overlapping_iter(tokens.lower_text()) {
            hit[m.pattern().as_usize()] = true;
        }
        for (i, kw) in self.lower_keywords.iter().enumerate() {
            if !hit[i] && tokens.contains_token(kw) {
                hit[i] = true;
            }
        }

        hit.iter()
            .enumerate()
            .filter_map(|(i, &matched)| matched.then_some(i))
            .collect()
    }

    /// Original-case keywords matching one entry text
    pub fn matching_keywords(&self, text: &str) -> Vec<&str> {
        let tokens = TokenSet::new(text);
        self.matching_keyword_indices(&tokens)
            .into_iter()
            .map(|i| self.concept.keywords[i].as_str())
            .collect()
    }

    /// Aggregate matches over a snapshot
    pub fn tally(&self, entries: &[Entry], preview_chars: usize) -> ConceptTally {
        let mut tally = ConceptTally::default();
        let mut position_by_id: HashMap<&str, usize> = HashMap::new();

        for entry in entries {
            let tokens = TokenSet::new(&entry.text);
            let indices = self.matching_keyword_indices(&tokens);
            if indices.is_empty() {
                continue;
            }

            let matched_keywords: Vec<String> = indices
                .iter()
                .map(|&i| self.concept.keywords[i].clone())
                .collect();
            for kw in &matched_keywords {
                tally.bump(kw);
            }

            let matched = MatchedEntry {
                entry_id: entry.id.clone(),
                timestamp: entry.timestamp.clone(),
                preview: entry.preview(preview_chars),
                matched_keywords,
            };

            // A repeated id replaces the earlier record in place
            match position_by_id.get(entry.id.as_str()) {
                Some(&pos) => tally.matched_entries[pos] = matched,
                None => {
                    position_by_id.insert(entry.id.as_str(), tally.matched_entries.len());
                    tally.matched_entries.push(matched);
                }
            }
        }

        tally
    }
}

/// Analyze one concept over a snapshot. None below the hit threshold.
pub fn analyze_concept(
    matcher: &ConceptMatcher,
    entries: &[Entry],
    config: &EngineConfig,
) -> Option<Reflection> {
    let tally = matcher.tally(entries, config.preview_chars);
    if tally.hit_count() < config.min_hit_count {
        return None;
    }
    Some(Reflection::from_tally(matcher.concept(), tally, entries.len(), config))
}
