//! PensieveCortex: WASM facade over the journal store and reflection engine
//!
//! Owns one entry store and one compiled generator. Each analysis call takes
//! a single snapshot of the store and runs entirely on it, so results never
//! mix entries from before and after a write.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::analysis::{
    analyze_emotion_trends, keyword_stats, unlock_status, Concept, ConceptLibrary, EmotionTrend,
    Reflection, ReflectionGenerator, UnlockStatus,
};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::journal::{
    generate_id, journal_stats, save_draft, search_entries, snapshot, Entry, EntryStore, JournalStats,
    MemoryEntryStore,
};

// =============================================================================
// Helpers
// =============================================================================

/// Serialize to a plain JS value (maps become objects, None becomes null)
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match value.serialize(&serializer) {
        Ok(v) => v,
        Err(e) => {
            crate::console_error(&format!("[PensieveCortex] Serialization failed: {:?}", e));
            JsValue::NULL
        }
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// =============================================================================
// PensieveCortex
// =============================================================================

/// Journal store + reflection engine
#[wasm_bindgen]
pub struct PensieveCortex {
    generator: ReflectionGenerator,
    store: MemoryEntryStore,
}

#[wasm_bindgen]
impl PensieveCortex {
    /// Built-in concept library, default thresholds, empty store
    #[wasm_bindgen(constructor)]
    pub fn js_new() -> std::result::Result<PensieveCortex, JsValue> {
        Self::new().map_err(js_err)
    }

    /// Built-in concept library with thresholds from JSON
    #[wasm_bindgen(js_name = withConfig)]
    pub fn js_with_config(config_json: &str) -> std::result::Result<PensieveCortex, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(js_err)?;
        Self::with_config(config).map_err(js_err)
    }

    /// Replace the concept library (JSON array of concepts)
    #[wasm_bindgen(js_name = loadConcepts)]
    pub fn js_load_concepts(&mut self, concepts_json: &str) -> std::result::Result<(), JsValue> {
        let library = ConceptLibrary::from_json(concepts_json).map_err(js_err)?;
        self.load_concepts(library).map_err(js_err)
    }

    /// Replace all entries from the persisted JSON array.
    /// Malformed input leaves the store empty. Returns the entry count.
    #[wasm_bindgen(js_name = hydrateEntries)]
    pub fn js_hydrate_entries(&mut self, entries_json: &str) -> usize {
        self.store = MemoryEntryStore::from_json(entries_json);
        self.store.len()
    }

    /// Persisted JSON array of all entries
    #[wasm_bindgen(js_name = exportEntries)]
    pub fn js_export_entries(&self) -> std::result::Result<String, JsValue> {
        self.store.to_json().map_err(js_err)
    }

    /// Insert or replace one `{ id, text, timestamp }` entry
    #[wasm_bindgen(js_name = upsertEntry)]
    pub fn js_upsert_entry(&mut self, entry: JsValue) -> std::result::Result<(), JsValue> {
        let entry: Entry = serde_wasm_bindgen::from_value(entry)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse entry: {}", e)))?;
        self.store.upsert(entry);
        Ok(())
    }

    /// Autosave the writer's draft; false when the draft is blank
    #[wasm_bindgen(js_name = saveDraft)]
    pub fn js_save_draft(&mut self, id: &str, text: &str) -> bool {
        self.save_draft(id, text)
    }

    #[wasm_bindgen(js_name = deleteEntry)]
    pub fn js_delete_entry(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    #[wasm_bindgen(js_name = entryCount)]
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Entries, newest first
    #[wasm_bindgen(js_name = listEntries)]
    pub fn js_list_entries(&self) -> JsValue {
        to_js(&self.entries())
    }

    /// Strongest reflection, or null
    #[wasm_bindgen(js_name = generateReflection)]
    pub fn js_generate_reflection(&self) -> JsValue {
        to_js(&self.generate_reflection())
    }

    /// Every qualifying reflection, ranked
    #[wasm_bindgen(js_name = generateAllReflections)]
    pub fn js_generate_all_reflections(&self) -> JsValue {
        to_js(&self.generate_all_reflections())
    }

    /// `{ word: entriesContainingWord }`
    #[wasm_bindgen(js_name = getKeywordStats)]
    pub fn js_keyword_stats(&self) -> JsValue {
        to_js(&self.keyword_stats())
    }

    #[wasm_bindgen(js_name = analyzeEmotionTrends)]
    pub fn js_emotion_trends(&self) -> JsValue {
        to_js(&self.emotion_trends())
    }

    #[wasm_bindgen(js_name = checkReflectionUnlock)]
    pub fn js_check_unlock(&self) -> JsValue {
        to_js(&self.check_unlock())
    }

    #[wasm_bindgen(js_name = journalStats)]
    pub fn js_journal_stats(&self) -> JsValue {
        to_js(&self.journal_stats())
    }

    #[wasm_bindgen(js_name = searchEntries)]
    pub fn js_search_entries(&self, query: &str) -> JsValue {
        to_js(&self.search_entries(query))
    }

    #[wasm_bindgen(js_name = searchConcepts)]
    pub fn js_search_concepts(&self, query: &str) -> JsValue {
        to_js(&self.search_concepts(query))
    }

    #[wasm_bindgen(js_name = concepts)]
    pub fn js_concepts(&self) -> JsValue {
        to_js(self.generator.library().concepts())
    }
}

/// New entry id: `entry_<unix millis>_<random base36>`
#[wasm_bindgen(js_name = generateId)]
pub fn js_generate_id() -> std::result::Result<String, JsValue> {
    generate_id().map_err(js_err)
}

impl PensieveCortex {
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let generator = ReflectionGenerator::new(ConceptLibrary::builtin()?, config)?;
        Ok(Self {
            generator,
            store: MemoryEntryStore::new(),
        })
    }

    /// Recompile with a new library, keeping thresholds
    pub fn load_concepts(&mut self, library: ConceptLibrary) -> Result<()> {
        let config = self.generator.config().clone();
        self.generator = ReflectionGenerator::new(library, config)?;
        Ok(())
    }

    pub fn store(&self) -> &MemoryEntryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryEntryStore {
        &mut self.store
    }

    pub fn generator(&self) -> &ReflectionGenerator {
        &self.generator
    }

    pub fn save_draft(&mut self, id: &str, text: &str) -> bool {
        save_draft(&mut self.store, id, text, Utc::now())
    }

    pub fn entries(&self) -> Vec<Entry> {
        snapshot(&self.store)
    }

    pub fn generate_reflection(&self) -> Option<Reflection> {
        self.generator.generate_reflection(&self.store)
    }

    pub fn generate_all_reflections(&self) -> Vec<Reflection> {
        self.generator.generate_all_reflections(&self.store)
    }

    pub fn keyword_stats(&self) -> BTreeMap<String, usize> {
        keyword_stats(&self.entries())
    }

    pub fn emotion_trends(&self) -> Vec<EmotionTrend> {
        analyze_emotion_trends(&self.entries())
    }

    pub fn check_unlock(&self) -> UnlockStatus {
        unlock_status(self.entries().len(), self.generator.config().required_entries)
    }

    pub fn journal_stats(&self) -> JournalStats {
        journal_stats(&self.entries())
    }

    pub fn search_entries(&self, query: &str) -> Vec<Entry> {
        let entries = self.entries();
        search_entries(&entries, query).into_iter().cloned().collect()
    }

    pub fn search_concepts(&self, query: &str) -> Vec<Concept> {
        self.generator
            .library()
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }
}
