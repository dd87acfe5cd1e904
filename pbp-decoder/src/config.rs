//! Decoder configuration types
//!
//! The decoder needs very little configuration: which extra category codes
//! carry lineup checkpoints, and optionally which periods to emit plays for.

use serde::{Deserialize, Serialize};

/// Configuration for the decoder library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Category codes treated as checkpoint-bearing in addition to period start/end
    #[serde(default)]
    pub checkpoint_categories: Vec<u16>,

    /// Optional: only emit plays from these periods
    ///
    /// Roster tracking still runs over every event so later periods see the
    /// correct lineup.
    #[serde(default)]
    pub period_filter: Option<Vec<u8>>,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: designate a category code as checkpoint-bearing
    pub fn with_checkpoint_category(mut self, code: u16) -> Self {
        if !self.checkpoint_categories.contains(&code) {
            self.checkpoint_categories.push(code);
        }
        self
    }

    /// Builder method: set period filter
    pub fn with_period_filter(mut self, periods: Vec<u8>) -> Self {
        self.period_filter = Some(periods);
        self
    }

    /// Check if a category code was designated checkpoint-bearing
    pub fn is_checkpoint_category(&self, code: u16) -> bool {
        self.checkpoint_categories.contains(&code)
    }

    /// Check if plays from a period should be emitted
    pub fn should_emit_period(&self, period: u8) -> bool {
        match &self.period_filter {
            Some(periods) => periods.contains(&period),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_config_builder() {
        let config = DecoderConfig::new()
            .with_checkpoint_category(9)
            .with_checkpoint_category(9)
            .with_period_filter(vec![1, 2]);

        assert_eq!(config.checkpoint_categories, vec![9]);
        assert!(config.is_checkpoint_category(9));
        assert!(!config.is_checkpoint_category(1));
        assert!(config.should_emit_period(2));
        assert!(!config.should_emit_period(3));
    }

    #[test]
    fn test_no_filters() {
        let config = DecoderConfig::new();
        assert!(config.should_emit_period(1));
        assert!(config.should_emit_period(7));
        assert!(config.checkpoint_categories.is_empty());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DecoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DecoderConfig::default());

        let json = r#"{"checkpoint_categories": [18], "period_filter": [4]}"#;
        let config: DecoderConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_checkpoint_category(18));
        assert!(config.should_emit_period(4));
        assert!(!config.should_emit_period(1));
    }
}
