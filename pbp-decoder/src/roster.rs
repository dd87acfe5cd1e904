//! Active rosters and the checkpoint index
//!
//! A [`Roster`] is a fixed array of ten slots: home 1-5 then away 1-5. Slot
//! positions are meaningful and never reordered; substitutions overwrite one
//! slot in place.

use crate::types::{
    DecoderError, LineupCheckpoint, Participant, ParticipantId, RawEvent, Result, Sequence,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Participants per side
pub const SIDE_SIZE: usize = 5;

/// Participants on the floor
pub const ROSTER_SIZE: usize = 2 * SIDE_SIZE;

/// Ten participants on the floor, in slot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster([Participant; ROSTER_SIZE]);

impl Roster {
    /// Build a roster from a checkpoint, checking slot counts and uniqueness
    pub fn from_checkpoint(checkpoint: &LineupCheckpoint) -> Result<Self> {
        let malformed = |reason: String| DecoderError::MalformedRoster {
            sequence: checkpoint.sequence,
            reason,
        };

        if checkpoint.home.len() != SIDE_SIZE || checkpoint.away.len() != SIDE_SIZE {
            return Err(malformed(format!(
                "expected {} home and {} away participants, got {} and {}",
                SIDE_SIZE,
                SIDE_SIZE,
                checkpoint.home.len(),
                checkpoint.away.len()
            )));
        }

        let slots: Vec<Participant> = checkpoint
            .home
            .iter()
            .chain(checkpoint.away.iter())
            .cloned()
            .collect();

        let mut seen = HashSet::with_capacity(ROSTER_SIZE);
        if let Some(duplicate) = slots.iter().find(|p| !seen.insert(p.id)) {
            return Err(malformed(format!("participant {} appears twice", duplicate)));
        }

        let slots: [Participant; ROSTER_SIZE] = slots
            .try_into()
            .map_err(|_| malformed("slot count mismatch".to_string()))?;
        Ok(Self(slots))
    }

    /// All ten participants in slot order
    pub fn participants(&self) -> &[Participant; ROSTER_SIZE] {
        &self.0
    }

    /// Home slots 1-5
    pub fn home(&self) -> &[Participant] {
        &self.0[..SIDE_SIZE]
    }

    /// Away slots 1-5
    pub fn away(&self) -> &[Participant] {
        &self.0[SIDE_SIZE..]
    }

    /// Slot index of a participant, if on the floor
    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.0.iter().position(|p| p.id == id)
    }

    /// Check whether a participant is on the floor
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.position_of(id).is_some()
    }

    /// Swap `outgoing` for `incoming` in the same slot
    ///
    /// Returns the slot that changed. The caller is responsible for checking
    /// that `incoming` is not already on the floor.
    pub(crate) fn substitute(
        &mut self,
        outgoing: ParticipantId,
        incoming: Participant,
    ) -> Option<usize> {
        let slot = self.position_of(outgoing)?;
        self.0[slot] = incoming;
        Some(slot)
    }

    /// Number of slots whose participant differs from `other`
    pub fn slot_differences(&self, other: &Roster) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a.id != b.id)
            .count()
    }
}

/// Validated checkpoints keyed by sequence number
///
/// Read-only after construction, so a single index can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct RosterIndex {
    rosters: HashMap<Sequence, Roster>,
}

impl RosterIndex {
    /// Build an index from a checkpoint collection
    ///
    /// Fails on the first checkpoint that does not hold exactly ten distinct
    /// participants, or when two checkpoints share a sequence number.
    pub fn new(checkpoints: &[LineupCheckpoint]) -> Result<Self> {
        let mut rosters = HashMap::with_capacity(checkpoints.len());

        for checkpoint in checkpoints {
            let roster = Roster::from_checkpoint(checkpoint)?;
            if rosters.insert(checkpoint.sequence, roster).is_some() {
                return Err(DecoderError::MalformedRoster {
                    sequence: checkpoint.sequence,
                    reason: "duplicate checkpoint sequence number".to_string(),
                });
            }
        }

        log::debug!("Roster index built with {} checkpoints", rosters.len());
        Ok(Self { rosters })
    }

    /// Build an index and check it covers the start of an event stream
    pub fn for_events(checkpoints: &[LineupCheckpoint], events: &[RawEvent]) -> Result<Self> {
        let index = Self::new(checkpoints)?;
        if let Some(first) = events.iter().map(|e| e.sequence).min() {
            if index.roster_at(first).is_none() {
                return Err(DecoderError::MissingInitialRoster { sequence: first });
            }
        }
        Ok(index)
    }

    /// Roster at exactly this sequence number
    pub fn roster_at(&self, sequence: Sequence) -> Option<&Roster> {
        self.rosters.get(&sequence)
    }

    /// Number of checkpoints
    pub fn checkpoint_count(&self) -> usize {
        self.rosters.len()
    }
}
