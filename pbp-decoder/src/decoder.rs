//! Main decoder API
//!
//! [`EventDecoder`] makes a single forward pass over a contest's events. It
//! keeps one piece of mutable state, the active roster, and emits a [`Play`]
//! for every event that represents observable action.
//!
//! # Example
//! ```
//! use pbp_decoder::{EventDecoder, LineupCheckpoint, Participant, RawEvent, RosterIndex};
//!
//! let side = |start: i64| (start..start + 5)
//!     .map(|id| Participant::new(id, format!("Player {}", id)))
//!     .collect::<Vec<_>>();
//! let checkpoints = vec![LineupCheckpoint::new(0, side(1), side(6))];
//! let events = vec![
//!     RawEvent::new(0, 12, 1, "12:00"),
//!     RawEvent::new(1, 1, 1, "11:41").with_player1(Participant::new(4, "Player 4")),
//! ];
//!
//! let index = RosterIndex::for_events(&checkpoints, &events).unwrap();
//! let decoded = EventDecoder::new().decode(&events, &index).unwrap();
//! assert_eq!(decoded.plays.len(), 1);
//! ```

use crate::category::{classify, EventRole};
use crate::config::DecoderConfig;
use crate::roster::{Roster, RosterIndex};
use crate::types::{
    DecodedContest, DecoderError, DesyncKind, Play, RawEvent, Result, RosterDesync,
};

/// Event-to-play decoder
///
/// Holds only configuration; each call to [`EventDecoder::decode`] owns its
/// own roster state, so one decoder can serve many contests concurrently.
#[derive(Debug, Clone, Default)]
pub struct EventDecoder {
    config: DecoderConfig,
}

impl EventDecoder {
    /// Create a decoder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decode an ordered event sequence into plays
    ///
    /// Fails before emitting anything if the events are not strictly ascending
    /// by sequence number or if the index has no checkpoint at the first
    /// event. Substitutions that cannot be applied are recorded in
    /// [`DecodedContest::diagnostics`] and skipped.
    pub fn decode(&self, events: &[RawEvent], index: &RosterIndex) -> Result<DecodedContest> {
        check_ordering(events)?;

        let Some(first) = events.first() else {
            log::debug!("No events to decode");
            return Ok(DecodedContest::default());
        };

        log::info!(
            "Decoding {} events starting at sequence {}",
            events.len(),
            first.sequence
        );

        let roster = index
            .roster_at(first.sequence)
            .cloned()
            .ok_or(DecoderError::MissingInitialRoster {
                sequence: first.sequence,
            })?;

        let mut pass = DecodePass {
            config: &self.config,
            index,
            roster,
            output: DecodedContest::default(),
        };
        for event in events {
            pass.process_event(event);
        }

        let output = pass.output;
        log::info!(
            "Decoded {} plays with {} roster diagnostics",
            output.plays.len(),
            output.diagnostics.len()
        );
        Ok(output)
    }
}

/// State of one decode pass
struct DecodePass<'a> {
    config: &'a DecoderConfig,
    index: &'a RosterIndex,
    roster: Roster,
    output: DecodedContest,
}

impl DecodePass<'_> {
    fn process_event(&mut self, event: &RawEvent) {
        let role = classify(event.category_code, self.config);
        log::trace!(
            "Event {} (code {}) classified as {:?}",
            event.sequence,
            event.category_code,
            role
        );

        // A checkpoint at this sequence is authoritative whatever the event is.
        let checkpoint_applied = self.apply_checkpoint(event);

        match role {
            EventRole::Checkpoint => {}
            EventRole::Substitution if checkpoint_applied => {
                log::debug!(
                    "Substitution at {} superseded by checkpoint at the same sequence",
                    event.sequence
                );
            }
            EventRole::Substitution => {
                self.output.substitutions += 1;
                self.apply_substitution(event);
            }
            EventRole::Play => {
                if self.config.should_emit_period(event.period) {
                    self.output.plays.push(Play::from_event(event, &self.roster));
                }
            }
        }
    }

    fn apply_checkpoint(&mut self, event: &RawEvent) -> bool {
        match self.index.roster_at(event.sequence) {
            Some(roster) => {
                log::debug!("Applying lineup checkpoint at sequence {}", event.sequence);
                self.roster = roster.clone();
                true
            }
            None => false,
        }
    }

    fn apply_substitution(&mut self, event: &RawEvent) {
        let (Some(outgoing), Some(incoming)) = (&event.player1, &event.player2) else {
            self.record_desync(event, DesyncKind::MissingParticipant);
            return;
        };

        if !self.roster.contains(outgoing.id) {
            self.record_desync(event, DesyncKind::OutgoingNotOnFloor(outgoing.clone()));
            return;
        }
        if self.roster.contains(incoming.id) {
            self.record_desync(event, DesyncKind::IncomingAlreadyOnFloor(incoming.clone()));
            return;
        }

        if let Some(slot) = self.roster.substitute(outgoing.id, incoming.clone()) {
            log::trace!("Slot {}: {} replaced by {}", slot + 1, outgoing, incoming);
        }
    }

    fn record_desync(&mut self, event: &RawEvent, kind: DesyncKind) {
        let desync = RosterDesync {
            sequence: event.sequence,
            kind,
        };
        log::warn!("{}", desync);
        self.output.diagnostics.push(desync);
    }
}

fn check_ordering(events: &[RawEvent]) -> Result<()> {
    for pair in events.windows(2) {
        if pair[1].sequence <= pair[0].sequence {
            return Err(DecoderError::UnorderedEvents {
                previous: pair[0].sequence,
                current: pair[1].sequence,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineupCheckpoint, Participant};

    fn side(start: i64) -> Vec<Participant> {
        (start..start + 5)
            .map(|id| Participant::new(id, format!("Player {}", id)))
            .collect()
    }

    fn index_at(sequence: u64) -> RosterIndex {
        RosterIndex::new(&[LineupCheckpoint::new(sequence, side(1), side(6))]).unwrap()
    }

    fn sub(sequence: u64, out: i64, inc: i64) -> RawEvent {
        RawEvent::new(sequence, 8, 1, "10:00")
            .with_player1(Participant::new(out, format!("Player {}", out)))
            .with_player2(Participant::new(inc, format!("Player {}", inc)))
    }

    #[test]
    fn test_empty_events() {
        let decoded = EventDecoder::new().decode(&[], &index_at(0)).unwrap();
        assert!(decoded.plays.is_empty());
        assert!(decoded.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_initial_roster() {
        let events = vec![RawEvent::new(1, 1, 1, "12:00")];
        let err = EventDecoder::new().decode(&events, &index_at(0)).unwrap_err();
        assert!(matches!(err, DecoderError::MissingInitialRoster { sequence: 1 }));
    }

    #[test]
    fn test_unordered_events_rejected() {
        let events = vec![RawEvent::new(0, 12, 1, "12:00"), RawEvent::new(0, 1, 1, "11:00")];
        let err = EventDecoder::new().decode(&events, &index_at(0)).unwrap_err();
        assert!(matches!(err, DecoderError::UnorderedEvents { previous: 0, current: 0 }));
    }

    #[test]
    fn test_incoming_already_on_floor() {
        let events = vec![
            RawEvent::new(0, 12, 1, "12:00"),
            sub(1, 3, 4),
            RawEvent::new(2, 4, 1, "9:00"),
        ];
        let decoded = EventDecoder::new().decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.diagnostics.len(), 1);
        assert!(matches!(
            decoded.diagnostics[0].kind,
            DesyncKind::IncomingAlreadyOnFloor(ref p) if p.id == 4
        ));
        assert_eq!(decoded.plays[0].roster.participants()[2].id, 3);
    }

    #[test]
    fn test_substitution_missing_participant() {
        let events = vec![
            RawEvent::new(0, 12, 1, "12:00"),
            RawEvent::new(1, 8, 1, "10:00").with_player1(Participant::new(3, "Player 3")),
        ];
        let decoded = EventDecoder::new().decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.diagnostics[0].kind, DesyncKind::MissingParticipant);
        assert!(decoded.plays.is_empty());
    }

    #[test]
    fn test_checkpoint_wins_over_substitution_at_same_sequence() {
        let index = RosterIndex::new(&[
            LineupCheckpoint::new(0, side(1), side(6)),
            LineupCheckpoint::new(5, side(21), side(26)),
        ])
        .unwrap();
        let events = vec![
            RawEvent::new(0, 12, 1, "12:00"),
            sub(5, 21, 40),
            RawEvent::new(6, 5, 1, "8:00"),
        ];
        let decoded = EventDecoder::new().decode(&events, &index).unwrap();
        assert!(decoded.diagnostics.is_empty());
        assert_eq!(decoded.substitutions, 0);
        assert_eq!(decoded.plays[0].roster.participants()[0].id, 21);
    }

    #[test]
    fn test_desync_rate_counts_substitutions() {
        let events = vec![
            RawEvent::new(0, 12, 1, "12:00"),
            sub(1, 3, 11),
            sub(2, 42, 12),
            RawEvent::new(3, 1, 1, "9:00"),
            RawEvent::new(4, 1, 1, "8:00"),
            RawEvent::new(5, 1, 1, "7:00"),
            sub(6, 4, 13),
            sub(7, 43, 14),
        ];
        let decoded = EventDecoder::new().decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.plays.len(), 3);
        assert_eq!(decoded.substitutions, 4);
        assert_eq!(decoded.diagnostics.len(), 2);
        assert_eq!(decoded.desync_rate(), 0.5);
    }

    #[test]
    fn test_desync_rate_without_substitutions() {
        let events = vec![RawEvent::new(0, 12, 1, "12:00"), RawEvent::new(1, 1, 1, "9:00")];
        let decoded = EventDecoder::new().decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.desync_rate(), 0.0);
    }

    #[test]
    fn test_period_filter_keeps_roster_tracking() {
        let config = DecoderConfig::new().with_period_filter(vec![2]);
        let events = vec![
            RawEvent::new(0, 12, 1, "12:00"),
            sub(1, 3, 11),
            RawEvent::new(2, 1, 1, "9:00"),
            RawEvent::new(3, 1, 2, "11:00"),
        ];
        let decoded = EventDecoder::with_config(config).decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.plays.len(), 1);
        assert_eq!(decoded.plays[0].sequence, 3);
        assert_eq!(decoded.plays[0].roster.participants()[2].id, 11);
    }

    #[test]
    fn test_designated_checkpoint_category_is_silent() {
        let config = DecoderConfig::new().with_checkpoint_category(9);
        let events = vec![RawEvent::new(0, 12, 1, "12:00"), RawEvent::new(1, 9, 1, "6:00")];
        let decoded = EventDecoder::with_config(config).decode(&events, &index_at(0)).unwrap();
        assert!(decoded.plays.is_empty());

        let decoded = EventDecoder::new().decode(&events, &index_at(0)).unwrap();
        assert_eq!(decoded.plays[0].category_label, "Timeout");
    }
}
