//! Contest sources
//!
//! This module contains the boundary to the contest store: a source hands the
//! decoder a contest's raw events and lineup checkpoints and nothing else.

use crate::types::{LineupCheckpoint, RawEvent, Result};

pub mod directory;
pub mod document;

// Re-export source types
pub use directory::DirectorySource;
pub use document::GameDocument;

/// Everything the decoder needs for one contest
#[derive(Debug, Clone, PartialEq)]
pub struct Contest {
    /// Contest identifier
    pub id: String,
    /// Raw events in ascending sequence order
    pub events: Vec<RawEvent>,
    /// Lineup checkpoints, in no particular order
    pub checkpoints: Vec<LineupCheckpoint>,
}

/// Common trait for contest stores
///
/// Query building, connections and pagination belong to the implementor.
pub trait ContestSource {
    /// Fetch one contest by identifier
    fn fetch_contest(&self, id: &str) -> Result<Contest>;
}
