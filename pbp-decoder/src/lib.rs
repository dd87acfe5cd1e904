//! Play-by-Play Decoder Library
//!
//! A reusable library that turns a contest's raw play-by-play event log into a
//! sequence of plays, each annotated with the ten participants on the floor.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Validates lineup checkpoints into a [`RosterIndex`]
//! - Classifies each event as checkpoint-bearing, substitution, or play
//! - Tracks the active roster through substitutions in a single pass
//! - Emits one [`Play`] per observable event, plus desync diagnostics
//!
//! The library does NOT:
//! - Derive statistics (offensive vs. defensive rebounds, shot value)
//! - Export tables or reports
//! - Manage database connections
//!
//! Export and interactive inspection live in the application layer (pbp-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use pbp_decoder::{decode_contest, ContestSource, DecoderConfig, DirectorySource};
//!
//! let source = DirectorySource::new("games");
//! let contest = source.fetch_contest("0021500001").unwrap();
//!
//! let decoded = decode_contest(&contest, &DecoderConfig::new()).unwrap();
//! for play in &decoded.plays {
//!     let description = play.description.as_deref().unwrap_or("");
//!     println!("{} {} {}", play.clock, play.category_label, description);
//! }
//! for desync in &decoded.diagnostics {
//!     eprintln!("{}", desync);
//! }
//! ```

// Public modules
pub mod category;
pub mod config;
pub mod decoder;
pub mod roster;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use category::{
    category_label, classify, EventCategory, EventRole, CATEGORY_LABELS, UNKNOWN_LABEL,
};
pub use config::DecoderConfig;
pub use decoder::EventDecoder;
pub use roster::{Roster, RosterIndex, ROSTER_SIZE, SIDE_SIZE};
pub use source::{Contest, ContestSource, DirectorySource, GameDocument};
pub use types::{
    DecodedContest, DecoderError, DesyncKind, LineupCheckpoint, Participant, ParticipantId, Play,
    PlaySequence, RawEvent, Result, RosterDesync, Sequence,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the roster index for a contest and decode its events
pub fn decode_contest(contest: &Contest, config: &DecoderConfig) -> Result<DecodedContest> {
    let index = RosterIndex::for_events(&contest.checkpoints, &contest.events)?;
    log::info!(
        "Decoding contest {} with {} lineup checkpoints",
        contest.id,
        index.checkpoint_count()
    );
    EventDecoder::with_config(config.clone()).decode(&contest.events, &index)
}
