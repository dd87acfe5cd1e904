//! Core types for the play-by-play decoder library
//!
//! This module defines the records the decoder consumes (raw events and lineup
//! checkpoints) and the records it emits (plays and desync diagnostics).
//! Inputs are never mutated by the decoder.

use crate::category;
use crate::roster::Roster;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Participant identifier as supplied by the feed
pub type ParticipantId = i64;

/// Event sequence number (defines the total order of a contest's events)
pub type Sequence = u64;

/// A participant referenced by the event stream
///
/// Two participants are equal when their identifiers are equal; the display
/// name is carried along for output only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Feed identifier
    pub id: ParticipantId,
    /// Display name
    pub name: String,
}

impl Participant {
    /// Create a new participant
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// An authoritative lineup at a point in the event stream
///
/// Built from out-of-band data (starting lineups, period lineups). Validation
/// happens when the checkpoint is loaded into a [`crate::RosterIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupCheckpoint {
    /// Sequence number the lineup applies to
    pub sequence: Sequence,
    /// Home participants, slots 1-5
    pub home: Vec<Participant>,
    /// Away participants, slots 1-5
    pub away: Vec<Participant>,
}

impl LineupCheckpoint {
    /// Create a new checkpoint
    pub fn new(sequence: Sequence, home: Vec<Participant>, away: Vec<Participant>) -> Self {
        Self {
            sequence,
            home,
            away,
        }
    }
}

/// One record from the source event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique sequence number
    pub sequence: Sequence,
    /// Raw event category code (see [`crate::category`])
    pub category_code: u16,
    /// Period number (1-based)
    pub period: u8,
    /// Game clock as supplied by the feed (e.g. "11:42")
    pub clock: String,
    /// First referenced participant (outgoing participant for substitutions)
    pub player1: Option<Participant>,
    /// Second referenced participant (incoming participant for substitutions)
    pub player2: Option<Participant>,
    /// Home-perspective description
    pub home_description: Option<String>,
    /// Visitor-perspective description
    pub visitor_description: Option<String>,
}

impl RawEvent {
    /// Create an event with no participants or descriptions
    pub fn new(
        sequence: Sequence,
        category_code: u16,
        period: u8,
        clock: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            category_code,
            period,
            clock: clock.into(),
            player1: None,
            player2: None,
            home_description: None,
            visitor_description: None,
        }
    }

    /// Builder method: set the first referenced participant
    pub fn with_player1(mut self, participant: Participant) -> Self {
        self.player1 = Some(participant);
        self
    }

    /// Builder method: set the second referenced participant
    pub fn with_player2(mut self, participant: Participant) -> Self {
        self.player2 = Some(participant);
        self
    }

    /// Builder method: set the home-perspective description
    pub fn with_home_description(mut self, text: impl Into<String>) -> Self {
        self.home_description = Some(text.into());
        self
    }

    /// Builder method: set the visitor-perspective description
    pub fn with_visitor_description(mut self, text: impl Into<String>) -> Self {
        self.visitor_description = Some(text.into());
        self
    }

    /// The populated description, home side first
    ///
    /// Empty strings count as missing, so an event with neither side filled
    /// in has no description at all.
    pub fn description(&self) -> Option<&str> {
        [&self.home_description, &self.visitor_description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
    }
}

/// One observable unit of game action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    /// Sequence number of the originating event
    pub sequence: Sequence,
    /// Participants on the floor when the event happened
    pub roster: Roster,
    /// Period number
    pub period: u8,
    /// Game clock
    pub clock: String,
    /// Raw category code, preserved even when unrecognized
    pub category_code: u16,
    /// Human-readable category label ("unknown" for unrecognized codes)
    pub category_label: &'static str,
    /// First referenced participant
    pub player1: Option<Participant>,
    /// Second referenced participant
    pub player2: Option<Participant>,
    /// Home or visitor description, whichever is populated
    pub description: Option<String>,
}

impl Play {
    /// Build a play from an event and the roster on the floor
    pub fn from_event(event: &RawEvent, roster: &Roster) -> Self {
        Self {
            sequence: event.sequence,
            roster: roster.clone(),
            period: event.period,
            clock: event.clock.clone(),
            category_code: event.category_code,
            category_label: category::category_label(event.category_code),
            player1: event.player1.clone(),
            player2: event.player2.clone(),
            description: event.description().map(str::to_owned),
        }
    }
}

/// Ordered plays of one contest
pub type PlaySequence = Vec<Play>;

/// Output of a decode pass: the plays plus per-event anomalies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedContest {
    /// Plays in sequence-number order
    pub plays: PlaySequence,
    /// Substitutions that could not be applied
    pub diagnostics: Vec<RosterDesync>,
    /// Substitution events the pass tried to apply
    pub substitutions: usize,
}

impl DecodedContest {
    /// Share of attempted substitutions that desynced (0.0 when there were none)
    pub fn desync_rate(&self) -> f64 {
        if self.substitutions == 0 {
            return 0.0;
        }
        self.diagnostics.len() as f64 / self.substitutions as f64
    }
}

/// A substitution that could not be applied to the active roster
///
/// Recorded, never thrown: the decode pass skips the substitution and moves on.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("Roster desync at event {sequence}: {kind}")]
pub struct RosterDesync {
    /// Sequence number of the offending substitution
    pub sequence: Sequence,
    /// What was wrong with it
    pub kind: DesyncKind,
}

/// Reason a substitution was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DesyncKind {
    /// The outgoing participant is not in the active roster
    OutgoingNotOnFloor(Participant),
    /// The incoming participant is already in the active roster
    IncomingAlreadyOnFloor(Participant),
    /// The event lacks the outgoing or incoming participant reference
    MissingParticipant,
}

impl fmt::Display for DesyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesyncKind::OutgoingNotOnFloor(p) => {
                write!(f, "outgoing {} is not on the floor", p)
            }
            DesyncKind::IncomingAlreadyOnFloor(p) => {
                write!(f, "incoming {} is already on the floor", p)
            }
            DesyncKind::MissingParticipant => write!(f, "substitution is missing a participant"),
        }
    }
}

/// Errors that abort index construction, decoding, or contest loading
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Malformed roster at sequence {sequence}: {reason}")]
    MalformedRoster { sequence: Sequence, reason: String },

    #[error("No lineup checkpoint at starting sequence {sequence}")]
    MissingInitialRoster { sequence: Sequence },

    #[error("Events out of order: {current} follows {previous}")]
    UnorderedEvents { previous: Sequence, current: Sequence },

    #[error("Failed to parse contest document: {0}")]
    DocumentParse(String),

    #[error("Contest not found: {0}")]
    ContestNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
