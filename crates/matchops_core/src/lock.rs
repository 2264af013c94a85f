//! Operator lock table.
//!
//! At most one lock row exists per match id. Acquisition is a single
//! insert-if-absent against the table, so there is no window between
//! checking the holder and writing the row. A lock is a back-reference for
//! availability checks only; dropping it never touches the match itself.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};
use crate::models::MatchId;
use crate::session::{OperatorId, OperatorSession};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorLock {
    pub operator_id: OperatorId,
    pub operator_name: String,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct LockTable {
    locks: HashMap<MatchId, OperatorLock>,
}

impl LockTable {
    pub fn new() -> Self {
        Self { locks: HashMap::new() }
    }

    /// Acquire or re-affirm the lock for `match_id`.
    ///
    /// Insert-if-absent: if no row exists one is created for the session;
    /// if the session already holds the row it is returned unchanged
    /// (`since` keeps the original acquisition time); if another operator
    /// holds it the call fails with `Conflict` naming the holder.
    pub fn acquire(&mut self, match_id: MatchId, session: &OperatorSession) -> Result<&OperatorLock> {
        match self.locks.entry(match_id) {
            Entry::Vacant(entry) => Ok(entry.insert(OperatorLock {
                operator_id: session.operator_id,
                operator_name: session.operator_name.clone(),
                since: Utc::now(),
            })),
            Entry::Occupied(entry) => {
                let lock = entry.into_mut();
                if lock.operator_id == session.operator_id {
                    Ok(lock)
                } else {
                    Err(OpsError::Conflict { holder: lock.operator_name.clone() })
                }
            }
        }
    }

    /// Remove the lock row if present. Idempotent; releasing a match nobody
    /// holds is a no-op.
    pub fn release(&mut self, match_id: MatchId) -> Option<OperatorLock> {
        self.locks.remove(&match_id)
    }

    pub fn holder(&self, match_id: MatchId) -> Option<&OperatorLock> {
        self.locks.get(&match_id)
    }

    pub fn is_held_by(&self, match_id: MatchId, operator_id: OperatorId) -> bool {
        self.holder(match_id).map(|l| l.operator_id == operator_id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_then_conflict() {
        let mut table = LockTable::new();
        let alice = OperatorSession::new("Alice");
        let bob = OperatorSession::new("Bob");
        let id = MatchId::new();

        assert!(table.acquire(id, &alice).is_ok());

        match table.acquire(id, &bob) {
            Err(OpsError::Conflict { holder }) => assert_eq!(holder, "Alice"),
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_reacquire_same_operator_keeps_original_since() {
        let mut table = LockTable::new();
        let alice = OperatorSession::new("Alice");
        let id = MatchId::new();

        let since = table.acquire(id, &alice).unwrap().since;
        let again = table.acquire(id, &alice).unwrap();
        assert_eq!(again.since, since);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut table = LockTable::new();
        let alice = OperatorSession::new("Alice");
        let id = MatchId::new();

        table.acquire(id, &alice).unwrap();
        assert!(table.release(id).is_some());
        assert!(table.release(id).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_release_frees_for_other_operator() {
        let mut table = LockTable::new();
        let alice = OperatorSession::new("Alice");
        let bob = OperatorSession::new("Bob");
        let id = MatchId::new();

        table.acquire(id, &alice).unwrap();
        table.release(id);
        let lock = table.acquire(id, &bob).unwrap();
        assert_eq!(lock.operator_name, "Bob");
    }
}
