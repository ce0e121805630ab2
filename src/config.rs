//! Configuration types and defaults for the reflection engine
//!
//! Defaults reproduce the journal app's fixed policy: three entries to unlock,
//! a theme must recur in three entries, confidence capped at 80%.

use serde::{Deserialize, Serialize};

use crate::error::{PensieveError, Result};

/// Engine thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Entries required before reflections unlock. Default: 3
    #[serde(default = "default_required_entries")]
    pub required_entries: usize,
    /// Distinct matching entries a concept needs to produce a reflection. Default: 3
    #[serde(default = "default_min_hit_count")]
    pub min_hit_count: usize,
    /// Upper bound on the hit ratio used for confidence. Default: 0.8
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,
    /// Characters kept in a matched entry preview. Default: 80
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_required_entries() -> usize { 3 }
fn default_min_hit_count() -> usize { 3 }
fn default_confidence_cap() -> f64 { 0.8 }
fn default_preview_chars() -> usize { 80 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            required_entries: default_required_entries(),
            min_hit_count: default_min_hit_count(),
            confidence_cap: default_confidence_cap(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl EngineConfig {
    /// Production configuration (same as default)
    pub fn production() -> Self {
        Self::default()
    }

    /// Demands more evidence before anything is surfaced
    pub fn strict() -> Self {
        Self {
            required_entries: 5,
            min_hit_count: 5,
            ..Self::default()
        }
    }

    /// Parse from JSON; absent fields take their defaults
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(raw)
            .map_err(|e| PensieveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the gate or the score meaningless
    pub fn validate(&self) -> Result<()> {
        if self.min_hit_count == 0 {
            return Err(PensieveError::InvalidConfig(
                "minHitCount must be at least 1".to_string(),
            ));
        }
        if !(self.confidence_cap > 0.0 && self.confidence_cap <= 1.0) {
            return Err(PensieveError::InvalidConfig(format!(
                "confidenceCap must be in (0, 1], got {}",
                self.confidence_cap
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_policy() {
        let config = EngineConfig::default();
        assert_eq!(config.required_entries, 3);
        assert_eq!(config.min_hit_count, 3);
        assert!((config.confidence_cap - 0.8).abs() < 1e-12);
        assert_eq!(config.preview_chars, 80);
        assert_eq!(EngineConfig::production(), config);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = EngineConfig::from_json(r#"{ "minHitCount": 4 }"#).unwrap();
        assert_eq!(config.min_hit_count, 4);
        assert_eq!(config.required_entries, 3);
        assert_eq!(config.preview_chars, 80);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "minHitCount": 0 }"#),
            Err(PensieveError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "confidenceCap": 1.5 }"#),
            Err(PensieveError::InvalidConfig(_))
        ));
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_strict_preset() {
        let strict = EngineConfig::strict();
        assert_eq!(strict.required_entries, 5);
        assert_eq!(strict.min_hit_count, 5);
        assert_eq!(strict.preview_chars, 80);
    }
}
