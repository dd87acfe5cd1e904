//! Directory-backed contest store
//!
//! Reads `<root>/<id>.json` game documents.

use crate::source::{Contest, ContestSource, GameDocument};
use crate::types::{DecoderError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Contest store over a directory of JSON documents
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a contest's document
    pub fn document_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Load a single document file
    pub fn load_file(path: &Path, id: &str) -> Result<Contest> {
        log::debug!("Loading contest document: {:?}", path);
        let file = File::open(path)?;
        GameDocument::from_reader(BufReader::new(file))?.into_contest(id)
    }
}

impl ContestSource for DirectorySource {
    fn fetch_contest(&self, id: &str) -> Result<Contest> {
        let path = self.document_path(id);
        if !path.is_file() {
            return Err(DecoderError::ContestNotFound(id.to_string()));
        }
        Self::load_file(&path, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "home_starters": [], "away_starters": [],
        "_playbyplay": {"resultSets": {"PlayByPlay": []}}
    }"#;

    #[test]
    fn test_fetch_existing_contest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("g1.json"), MINIMAL).unwrap();

        let source = DirectorySource::new(dir.path());
        let contest = source.fetch_contest("g1").unwrap();
        assert_eq!(contest.id, "g1");
        assert!(contest.events.is_empty());
    }

    #[test]
    fn test_missing_contest() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.fetch_contest("nope"),
            Err(DecoderError::ContestNotFound(id)) if id == "nope"
        ));
    }
}
