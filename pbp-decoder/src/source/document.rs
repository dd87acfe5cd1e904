//! Game document format
//!
//! Contest documents are JSON objects holding the starting lineups and the
//! feed's play-by-play result set. Player references use `0` or `null` for
//! "no player"; both become `None`.

use crate::source::Contest;
use crate::types::{DecoderError, LineupCheckpoint, Participant, RawEvent, Result, Sequence};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Top-level contest document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameDocument {
    /// Store identifier, if the document carries one
    ///
    /// Accepts a plain string, a number, or an extended-JSON `{"$oid": ...}`
    /// object; any other shape is kept but not used as the contest id.
    #[serde(rename = "_id", default)]
    pub id: Option<serde_json::Value>,
    pub home_starters: Vec<PlayerRef>,
    pub away_starters: Vec<PlayerRef>,
    /// Additional out-of-band lineups
    #[serde(default)]
    pub lineups: Vec<LineupDoc>,
    #[serde(rename = "_playbyplay")]
    pub play_by_play: PlayByPlayDoc,
}

/// A player as listed in lineups
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerRef {
    pub id: i64,
    pub name: String,
}

/// An explicit lineup at a sequence number
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineupDoc {
    pub sequence: Sequence,
    pub home: Vec<PlayerRef>,
    pub away: Vec<PlayerRef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayByPlayDoc {
    #[serde(rename = "resultSets")]
    pub result_sets: ResultSets,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultSets {
    #[serde(rename = "PlayByPlay")]
    pub play_by_play: Vec<EventDoc>,
}

/// One play-by-play row as the feed names it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EventDoc {
    #[serde(rename = "EVENTNUM")]
    pub event_num: Sequence,
    #[serde(rename = "EVENTMSGTYPE")]
    pub event_msg_type: u16,
    pub period: u8,
    #[serde(rename = "PCTIMESTRING", default)]
    pub pc_time_string: String,
    #[serde(default)]
    pub player1_id: Option<i64>,
    #[serde(default)]
    pub player1_name: Option<String>,
    #[serde(default)]
    pub player2_id: Option<i64>,
    #[serde(default)]
    pub player2_name: Option<String>,
    #[serde(rename = "HOMEDESCRIPTION", default)]
    pub home_description: Option<String>,
    #[serde(rename = "VISITORDESCRIPTION", default)]
    pub visitor_description: Option<String>,
}

impl EventDoc {
    fn to_raw_event(&self) -> RawEvent {
        RawEvent {
            sequence: self.event_num,
            category_code: self.event_msg_type,
            period: self.period,
            clock: self.pc_time_string.clone(),
            player1: player(self.player1_id, &self.player1_name),
            player2: player(self.player2_id, &self.player2_name),
            home_description: self.home_description.clone(),
            visitor_description: self.visitor_description.clone(),
        }
    }
}

fn player(id: Option<i64>, name: &Option<String>) -> Option<Participant> {
    match id {
        Some(id) if id != 0 => Some(Participant::new(id, name.clone().unwrap_or_default())),
        _ => None,
    }
}

fn document_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        serde_json::Value::Object(fields) => fields
            .get("$oid")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

fn participants(refs: &[PlayerRef]) -> Vec<Participant> {
    refs.iter().map(|p| Participant::new(p.id, p.name.clone())).collect()
}

impl GameDocument {
    /// Parse a document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Convert into a contest
    ///
    /// Events are sorted by sequence number. The starting lineups become the
    /// checkpoint at the first event; explicit lineups are added as-is.
    pub fn into_contest(self, fallback_id: &str) -> Result<Contest> {
        let mut events: Vec<RawEvent> = self
            .play_by_play
            .result_sets
            .play_by_play
            .iter()
            .map(EventDoc::to_raw_event)
            .collect();
        events.sort_by_key(|e| e.sequence);

        let first = events.first().map(|e| e.sequence).unwrap_or_default();
        if self.lineups.iter().any(|l| l.sequence == first) {
            return Err(DecoderError::DocumentParse(format!(
                "explicit lineup collides with starters at sequence {}",
                first
            )));
        }

        let mut checkpoints = vec![LineupCheckpoint::new(
            first,
            participants(&self.home_starters),
            participants(&self.away_starters),
        )];
        checkpoints.extend(self.lineups.iter().map(|lineup| {
            LineupCheckpoint::new(
                lineup.sequence,
                participants(&lineup.home),
                participants(&lineup.away),
            )
        }));

        Ok(Contest {
            id: self
                .id
                .as_ref()
                .and_then(document_id)
                .unwrap_or_else(|| fallback_id.to_string()),
            events,
            checkpoints,
        })
    }
}
