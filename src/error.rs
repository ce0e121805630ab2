//! Error types for Pensieve Core
//!
//! Only constructors and loaders fail. Analysis over an entry snapshot never
//! returns an error; an unreadable store degrades to zero entries.

use thiserror::Error;

/// Errors raised while loading configuration, concepts or entries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PensieveError {
    #[error("Invalid concept library: {0}")]
    InvalidConceptLibrary(String),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Invalid entries: {0}")]
    InvalidEntries(String),

    #[error("Entry store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to generate entry id: {0}")]
    IdGeneration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, PensieveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = PensieveError::InvalidConceptLibrary("duplicate id 'stoic'".to_string());
        assert_eq!(err.to_string(), "Invalid concept library: duplicate id 'stoic'");

        let err = PensieveError::StoreUnavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Entry store unavailable: quota exceeded");
    }
}
