//! Concept Library: named psychological themes with keywords and templates
//!
//! The built-in library ships in `data/concepts.json` and is embedded at
//! compile time. Concepts are immutable once loaded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::template::render_template;
use crate::error::{PensieveError, Result};

const BUILTIN_CONCEPTS: &str = include_str!("../../data/concepts.json");

/// Placeholder values used for the library page's sample text
const SAMPLE_HIT_COUNT: &str = "3";
const SAMPLE_TOTAL_ENTRIES: &str = "5";
const SAMPLE_KEYWORDS: usize = 3;
const SAMPLE_FREQUENCY: &str = "multiple occurrences";

/// A theme the engine can recognize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub name: String,
    pub citation: String,
    pub description: String,
    /// Ordered; order decides first-matched ordering in reflections
    pub keywords: Vec<String>,
    /// Uses `{hitCount}` and `{totalEntries}`
    pub insight_template: String,
    /// Uses `{matchedKeywords}` and `{frequency}`
    pub why_explanation: String,
}

impl Concept {
    /// Insight text with sample numbers (3 of 5)
    pub fn sample_insight(&self) -> String {
        render_template(
            &self.insight_template,
            &[("hitCount", SAMPLE_HIT_COUNT), ("totalEntries", SAMPLE_TOTAL_ENTRIES)],
        )
    }

    /// Explanation text using the first few keywords as sample matches
    pub fn sample_why(&self) -> String {
        let keywords = self
            .keywords
            .iter()
            .take(SAMPLE_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        render_template(
            &self.why_explanation,
            &[("matchedKeywords", keywords.as_str()), ("frequency", SAMPLE_FREQUENCY)],
        )
    }

    /// Case-insensitive match on name or any keyword
    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.keywords.iter().any(|kw| kw.to_lowercase().contains(needle))
    }
}

/// Ordered, validated set of concepts
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptLibrary {
    concepts: Vec<Concept>,
}

impl ConceptLibrary {
    /// The library bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONCEPTS)
    }

    /// Parse and validate a JSON array of concepts
    pub fn from_json(raw: &str) -> Result<Self> {
        let concepts: Vec<Concept> = serde_json::from_str(raw)
            .map_err(|e| PensieveError::InvalidConceptLibrary(e.to_string()))?;
        Self::new(concepts)
    }

    /// Validate: non-empty, unique ids, at least one non-blank keyword each,
    /// no keyword repeated within a concept
    pub fn new(concepts: Vec<Concept>) -> Result<Self> {
        if concepts.is_empty() {
            return Err(PensieveError::InvalidConceptLibrary(
                "library has no concepts".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for concept in &concepts {
            if !ids.insert(concept.id.as_str()) {
                return Err(PensieveError::InvalidConceptLibrary(format!(
                    "duplicate concept id '{}'",
                    concept.id
                )));
            }
            if concept.keywords.is_empty() {
                return Err(PensieveError::InvalidConceptLibrary(format!(
                    "concept '{}' has no keywords",
                    concept.id
                )));
            }
            let mut seen = HashSet::new();
            for keyword in &concept.keywords {
                if keyword.trim().is_empty() {
                    return Err(PensieveError::InvalidConceptLibrary(format!(
                        "concept '{}' has a blank keyword",
                        concept.id
                    )));
                }
                if !seen.insert(keyword.to_lowercase()) {
                    return Err(PensieveError::InvalidConceptLibrary(format!(
                        "concept '{}' repeats keyword '{}'",
                        concept.id, keyword
                    )));
                }
            }
        }

        Ok(Self { concepts })
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Concepts whose name or keywords contain the query; blank query returns all
    pub fn search(&self, query: &str) -> Vec<&Concept> {
        if query.trim().is_empty() {
            return self.concepts.iter().collect();
        }
        let needle = query.to_lowercase();
        self.concepts
            .iter()
            .filter(|c| c.matches_query(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(id: &str, keywords: &[&str]) -> Concept {
        Concept {
            id: id.to_string(),
            name: format!("Concept {}", id),
            citation: "Someone (2000)".to_string(),
            description: "A theme".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            insight_template: "Seen in {hitCount} of {totalEntries} entries.".to_string(),
            why_explanation: "Matched {matchedKeywords}; {frequency}.".to_string(),
        }
    }

    #[test]
    fn test_builtin_library_loads() {
        let library = ConceptLibrary::builtin().unwrap();
        assert!(library.len() >= 5);
        assert!(library.get("gratitude").is_some());
        assert!(library.get("dichotomy-of-control").is_some());

        for c in library.concepts() {
            assert!(c.insight_template.contains("{hitCount}"), "{}", c.id);
            assert!(c.insight_template.contains("{totalEntries}"), "{}", c.id);
            assert!(c.why_explanation.contains("{matchedKeywords}"), "{}", c.id);
            assert!(c.why_explanation.contains("{frequency}"), "{}", c.id);
        }
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            ConceptLibrary::new(vec![]),
            Err(PensieveError::InvalidConceptLibrary(_))
        ));
        assert!(ConceptLibrary::new(vec![concept("a", &["x"]), concept("a", &["y"])]).is_err());
        assert!(ConceptLibrary::new(vec![concept("a", &[])]).is_err());
        assert!(ConceptLibrary::new(vec![concept("a", &["ok", "  "])]).is_err());
        assert!(ConceptLibrary::new(vec![concept("a", &["Calm", "calm"])]).is_err());
        assert!(ConceptLibrary::from_json("[{\"id\": 1}]").is_err());
    }

    #[test]
    fn test_search_by_name_and_keyword() {
        let library = ConceptLibrary::new(vec![
            concept("stoic", &["control", "what if"]),
            concept("growth", &["learn", "improve"]),
        ])
        .unwrap();

        assert_eq!(library.search("").len(), 2);
        assert_eq!(library.search("   ").len(), 2);

        let by_keyword = library.search("IMPROV");
        assert_eq!(by_keyword.len(), 1);
        assert_eq!(by_keyword[0].id, "growth");

        let by_name = library.search("concept stoic");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "stoic");

        assert!(library.search("zebra").is_empty());
    }

    #[test]
    fn test_sample_rendering() {
        let c = concept("a", &["one", "two", "three", "four"]);
        assert_eq!(c.sample_insight(), "Seen in 3 of 5 entries.");
        assert_eq!(c.sample_why(), "Matched one, two, three; multiple occurrences.");
    }
}
