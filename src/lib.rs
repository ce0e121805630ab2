//! Pensieve Core: Journal Theme Detection + Reflection Engine
//!
//! A Rust/WASM implementation of the Pensieve journal analysis pipeline.
//!
//! # Architecture
//!
//! ## Journal Components
//! - `entry.rs` - Entry / MatchedEntry records
//! - `store.rs` - EntryStore contract + MemoryEntryStore, draft autosave, id generation
//! - `stats.rs` - Timeline statistics (word counts, day span, text search)
//!
//! ## Analysis Components
//! - `tokenizer.rs` - Unigram + bigram + full-text token sets
//! - `concepts.rs` - Concept library (embedded `data/concepts.json`)
//! - `matcher.rs` - Per-concept keyword matching and aggregation
//! - `template.rs` - First-occurrence placeholder substitution
//! - `reflection.rs` - ReflectionGenerator: threshold, ranking, keyword stats
//! - `trends.rs` - Emotion category trend counts
//! - `unlock.rs` - Reflection unlock gate
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { PensieveCortex } from 'pensieve-core';
//!
//! await init();
//!
//! const cortex = new PensieveCortex();
//! cortex.hydrateEntries(localStorage.getItem('pensieve_entries'));
//!
//! const status = cortex.checkReflectionUnlock();
//! if (status.unlocked) {
//!   const reflection = cortex.generateReflection(); // null when no theme recurs
//! }
//! const trends = cortex.analyzeEmotionTrends();     // always 4 categories
//! ```

pub mod analysis;
pub mod config;
pub mod cortex;
pub mod error;
pub mod journal;

pub use analysis::*;
pub use config::*;
pub use cortex::*;
pub use error::*;
pub use journal::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("pensieve-core v{}", env!("CARGO_PKG_VERSION"))
}

/// Log a line to the browser console. Compiled out on native targets.
#[allow(unused_variables)]
pub(crate) fn console_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Log an error line to the browser console. Compiled out on native targets.
#[allow(unused_variables)]
pub(crate) fn console_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(message));
}
