use crate::error::{OpsError, Result};
use crate::models::{MatchId, MatchRecord, MatchStatus, NewMatch, TeamSheet};

use super::MatchStore;

/// In-memory store, insertion-ordered. State lives and dies with the
/// process; the reference deployment for tests and the JSON API.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<MatchRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build the initial record for a creation payload. Shared by both stores
/// so id assignment and defaulting stay identical.
pub(crate) fn record_from_new(data: &NewMatch) -> Result<MatchRecord> {
    let kickoff = data.kickoff()?;
    Ok(MatchRecord {
        id: MatchId::new(),
        competition: data.competition.clone(),
        game_type: data.game_type,
        venue: data.venue.clone(),
        kickoff,
        home: TeamSheet::new(data.home_team.clone()),
        away: TeamSheet::new(data.away_team.clone()),
        status: MatchStatus::Upcoming,
        events: Vec::new(),
        officials: Default::default(),
        settings: None,
    })
}

impl MatchStore for MemoryStore {
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
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, record: &MatchRecord) -> Result<MatchRecord> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(OpsError::NotFound { match_id: record.id.to_string() })?;
        *slot = record.clone();
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameType;

    fn new_match() -> NewMatch {
        NewMatch {
            competition: "League".to_string(),
            game_type: GameType::Football,
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            venue: "Ground".to_string(),
            date: "2024-06-10".to_string(),
            start_time: "18:30".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_defaults() {
        let mut store = MemoryStore::new();
        let record = store.create(&new_match()).unwrap();

        assert_eq!(record.status, MatchStatus::Upcoming);
        assert_eq!(record.home.score, 0);
        assert_eq!(record.away.score, 0);
        assert!(record.events.is_empty());
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.get(MatchId::new()), Err(OpsError::NotFound { .. })));
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = MemoryStore::new();
        let mut record = store.create(&new_match()).unwrap();
        record.home.score = 3;
        store.update(&record).unwrap();

        assert_eq!(store.get(record.id).unwrap().home.score, 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = MemoryStore::new();
        let a = store.create(&new_match()).unwrap();
        let b = store.create(&new_match()).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed[0].id, a.id);
        assert_eq!(listed[1].id, b.id);
    }
}
