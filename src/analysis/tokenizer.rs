//! Tokenizer: entry text → lookup-ready token set
//!
//! Tokens are lowercase runs of `[a-z']`; everything else separates them.
//! The set holds unigrams, adjacent-pair bigrams and the whole lowercased
//! text, so phrase keywords longer than two words can still hit as a unit.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"[a-z']+").expect("word pattern is valid"))
}

/// Tokenized form of one entry
#[derive(Debug, Clone)]
pub struct TokenSet {
    lower: String,
    tokens: HashSet<String>,
}

impl TokenSet {
    /// Tokenize raw entry text
    pub fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let words = unigrams(&lower);

        let mut tokens: HashSet<String> = HashSet::with_capacity(words.len() * 2 + 1);
        tokens.extend(bigrams(&words));
        tokens.extend(words.into_iter().map(str::to_string));
        tokens.insert(lower.clone());

        Self { lower, tokens }
    }

    /// Exact token membership
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// The full lowercased text
    pub fn lower_text(&self) -> &str {
        &self.lower
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Word runs of already-lowercased text, in order of appearance
pub fn unigrams(lower: &str) -> Vec<&str> {
    word_regex().find_iter(lower).map(|m| m.as_str()).collect()
}

/// Adjacent word pairs joined by a single space
pub fn bigrams(words: &[&str]) -> Vec<String> {
    words
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}
