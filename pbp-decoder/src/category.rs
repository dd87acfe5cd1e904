//! Event categories and per-event classification
//!
//! The feed codes every event with a small integer category. The decoder only
//! needs to know which of three roles an event plays: it carries a lineup
//! checkpoint, it substitutes one participant, or it is an observable play.

use crate::config::DecoderConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for category codes outside the known table
pub const UNKNOWN_LABEL: &str = "unknown";

/// Fixed code-to-label table for the known categories
pub const CATEGORY_LABELS: [(u16, &str); 13] = [
    (1, "Field Goal"),
    (2, "Missed FG"),
    (3, "Free throw"),
    (4, "Rebound"),
    (5, "Turnover"),
    (6, "Foul"),
    (7, "Violation"),
    (8, "Substitution"),
    (9, "Timeout"),
    (10, "Jump Ball"),
    (11, "Ejection"),
    (12, "Period Start"),
    (13, "Period End"),
];

/// Event category decoded from its raw code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    FieldGoal,
    MissedFieldGoal,
    FreeThrow,
    Rebound,
    Turnover,
    Foul,
    Violation,
    Substitution,
    Timeout,
    JumpBall,
    Ejection,
    PeriodStart,
    PeriodEnd,
    /// Code outside the known table, kept verbatim
    Unknown(u16),
}

impl EventCategory {
    /// Decode a raw category code
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => EventCategory::FieldGoal,
            2 => EventCategory::MissedFieldGoal,
            3 => EventCategory::FreeThrow,
            4 => EventCategory::Rebound,
            5 => EventCategory::Turnover,
            6 => EventCategory::Foul,
            7 => EventCategory::Violation,
            8 => EventCategory::Substitution,
            9 => EventCategory::Timeout,
            10 => EventCategory::JumpBall,
            11 => EventCategory::Ejection,
            12 => EventCategory::PeriodStart,
            13 => EventCategory::PeriodEnd,
            other => EventCategory::Unknown(other),
        }
    }

    /// Raw code for this category
    pub fn code(&self) -> u16 {
        match self {
            EventCategory::FieldGoal => 1,
            EventCategory::MissedFieldGoal => 2,
            EventCategory::FreeThrow => 3,
            EventCategory::Rebound => 4,
            EventCategory::Turnover => 5,
            EventCategory::Foul => 6,
            EventCategory::Violation => 7,
            EventCategory::Substitution => 8,
            EventCategory::Timeout => 9,
            EventCategory::JumpBall => 10,
            EventCategory::Ejection => 11,
            EventCategory::PeriodStart => 12,
            EventCategory::PeriodEnd => 13,
            EventCategory::Unknown(code) => *code,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        category_label(self.code())
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Look up the label for a raw code, falling back to [`UNKNOWN_LABEL`]
pub fn category_label(code: u16) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// What the decoder does with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRole {
    /// Silent: replace the active roster with the checkpoint at this sequence, if any
    Checkpoint,
    /// Silent: patch one slot of the active roster
    Substitution,
    /// Emit a play
    Play,
}

/// Classify a raw category code
///
/// Period start/end are always checkpoint-bearing; the config may designate
/// additional codes. Everything else that is not a substitution is a play,
/// including unknown codes.
pub fn classify(code: u16, config: &DecoderConfig) -> EventRole {
    match EventCategory::from_code(code) {
        EventCategory::PeriodStart | EventCategory::PeriodEnd => EventRole::Checkpoint,
        _ if config.is_checkpoint_category(code) => EventRole::Checkpoint,
        EventCategory::Substitution => EventRole::Substitution,
        _ => EventRole::Play,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_for_known_table() {
        for (code, label) in CATEGORY_LABELS {
            let category = EventCategory::from_code(code);
            assert_eq!(category.code(), code);
            assert_eq!(category.label(), label);
        }
    }

    #[test]
    fn test_unknown_code_label() {
        assert_eq!(category_label(0), UNKNOWN_LABEL);
        assert_eq!(category_label(99), UNKNOWN_LABEL);
        assert_eq!(EventCategory::from_code(99), EventCategory::Unknown(99));
        assert_eq!(EventCategory::from_code(99).code(), 99);
    }

    #[test]
    fn test_default_classification() {
        let config = DecoderConfig::new();
        assert_eq!(classify(12, &config), EventRole::Checkpoint);
        assert_eq!(classify(13, &config), EventRole::Checkpoint);
        assert_eq!(classify(8, &config), EventRole::Substitution);
        for code in [1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 99] {
            assert_eq!(classify(code, &config), EventRole::Play, "code {}", code);
        }
    }

    #[test]
    fn test_designated_checkpoint_category() {
        let config = DecoderConfig::new().with_checkpoint_category(9);
        assert_eq!(classify(9, &config), EventRole::Checkpoint);
        assert_eq!(classify(1, &config), EventRole::Play);
    }
}
