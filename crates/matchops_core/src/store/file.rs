//! JSON file-backed match store.
//!
//! Loads the whole file on open, rewrites it on every mutation. Writes go
//! to a sibling temp file first and are moved into place with `rename`, so
//! a crash mid-write leaves the previous file intact.

use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};
use crate::models::{MatchId, MatchRecord, NewMatch};

use super::memory::record_from_new;
use super::MatchStore;

pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    records: Vec<MatchRecord>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: Vec<MatchRecord>,
}

impl FileStore {
    /// Open an existing store file, or start empty if none exists yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Ok(Self { path, records: Vec::new() });
        }

        let mut raw = String::new();
        File::open(&path)?.read_to_string(&mut raw)?;
        let parsed: StoreFile = serde_json::from_str(&raw)?;

        if parsed.version != STORE_VERSION {
            return Err(OpsError::VersionMismatch {
                found: parsed.version,
                expected: STORE_VERSION,
            });
        }

        Ok(Self { path, records: parsed.records })
    }

    /// Serialize and atomically replace the store file. Callers commit
    /// `records` to memory only after this returns Ok, so a failed write
    /// never leaves memory ahead of disk.
    fn persist(&self, records: &[MatchRecord]) -> Result<()> {
        let body = serde_json::to_string_pretty(&StoreFile {
            version: STORE_VERSION,
            records: records.to_vec(),
        })?;

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(body.as_bytes())?;
            file.sync_all()?;
        }
        rename(&tmp, &self.path)?;

        log::debug!("Persisted {} match records to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl MatchStore for FileStore {
    fn list(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: MatchId) -> Result<MatchRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(OpsError::NotFound { match_id: id.to_string() })
    }

    fn create(&mut self, data: &NewMatch) -> Result<MatchRecord> {
        let record = record_from_new(data)?;

        let mut records = self.records.clone();
        records.push(record.clone());
        self.persist(&records)?;
        self.records = records;
        Ok(record)
    }

    fn update(&mut self, record: &MatchRecord) -> Result<MatchRecord> {
        let mut records = self.records.clone();
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(OpsError::NotFound { match_id: record.id.to_string() })?;
        *slot = record.clone();

        self.persist(&records)?;
        self.records = records;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameType, MatchStatus};

    fn new_match() -> NewMatch {
        NewMatch {
            competition: "Cup".to_string(),
            game_type: GameType::Volleyball,
            home_team: "North".to_string(),
            away_team: "South".to_string(),
            venue: "Hall 2".to_string(),
            date: "2024-07-01".to_string(),
            start_time: "10:00".to_string(),
        }
    }

    #[test]
    fn test_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");

        let id = {
            let mut store = FileStore::open(&path).unwrap();
            store.create(&new_match()).unwrap().id
        };

        let store = FileStore::open(&path).unwrap();
        let record = store.get(id).unwrap();
        assert_eq!(record.status, MatchStatus::Upcoming);
        assert_eq!(record.home.name, "North");
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("fresh.json")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");
        std::fs::write(&path, r#"{"version": 99, "records": []}"#).unwrap();

        match FileStore::open(&path) {
            Err(OpsError::VersionMismatch { found, expected }) => {
                assert_eq!(found, 99);
                assert_eq!(expected, STORE_VERSION);
            }
            other => panic!("expected VersionMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_failed_write_leaves_memory_at_disk_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");

        let mut store = FileStore::open(&path).unwrap();
        let mut record = store.create(&new_match()).unwrap();

        // Block the temp file path so the next write fails
        let tmp = path.with_extension("tmp");
        std::fs::create_dir(&tmp).unwrap();

        record.home.score = 5;
        assert!(store.update(&record).is_err());

        // The failed update must not be visible, neither in memory...
        assert_eq!(store.get(record.id).unwrap().home.score, 0);
        // ...nor on disk after a reopen
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(record.id).unwrap().home.score, 0);

        // Once the write path clears, the same update goes through
        std::fs::remove_dir(&tmp).unwrap();
        store.update(&record).unwrap();
        assert_eq!(store.get(record.id).unwrap().home.score, 5);
    }

    #[test]
    fn test_failed_create_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");

        let mut store = FileStore::open(&path).unwrap();
        std::fs::create_dir(path.with_extension("tmp")).unwrap();

        assert!(store.create(&new_match()).is_err());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");

        let mut store = FileStore::open(&path).unwrap();
        let mut record = store.create(&new_match()).unwrap();
        record.away.score = 2;
        store.update(&record).unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(record.id).unwrap().away.score, 2);
    }
}
