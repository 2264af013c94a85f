//! Match Lifecycle Manager.
//!
//! Owns the match store handle, the operator lock table and the per-operator
//! active-match view. All status transitions and lock movements go through
//! this type; callers (console, JSON API) hold no rules of their own.
//!
//! Caller identity is passed per operation, mirroring a session store that
//! is read synchronously when needed.

use std::collections::HashMap;

use crate::error::{OpsError, Result};
use crate::lock::LockTable;
use crate::models::{MatchEvent, MatchId, MatchRecord, MatchSetup, MatchStatus, NewMatch};
use crate::session::{OperatorId, OperatorSession};
use crate::store::MatchStore;
use crate::wizard::SetupWizard;

/// What `initialize_setup` hands back, depending on match status.
#[derive(Debug)]
pub enum SetupHandle {
    /// Match was `Upcoming`: the operator lock is now held and the setup
    /// wizard can run.
    Setup(SetupWizard),
    /// Match was already `Live`: returned for scoreboard viewing, no lock
    /// acquired. Viewers of a live match do not contend for the lock.
    Scoreboard(Box<MatchRecord>),
}

/// Score overwrite payload for a live scoreboard correction.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ScoreUpdate {
    pub home_score: u32,
    pub away_score: u32,
}

pub struct LifecycleManager {
    store: Box<dyn MatchStore>,
    locks: LockTable,
    /// Which match each operator currently has open on their console.
    active: HashMap<OperatorId, MatchId>,
}

impl LifecycleManager {
    pub fn new(store: Box<dyn MatchStore>) -> Self {
        Self { store, locks: LockTable::new(), active: HashMap::new() }
    }

    /// All matches, store-defined order. Callers group by status.
    pub fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        self.store.list()
    }

    pub fn get_match(&self, match_id: MatchId) -> Result<MatchRecord> {
        self.store.get(match_id)
    }

    /// The match this operator currently has open, if any.
    pub fn active_match(&self, session: &OperatorSession) -> Option<MatchId> {
        self.active.get(&session.operator_id).copied()
    }

    /// Whether `session` may take over management of `match_id`.
    ///
    /// Succeeds (true) when the match is unlocked or already held by the
    /// caller; fails with `Conflict` naming the holder otherwise. Purely a
    /// read; acquisition itself happens in `initialize_setup`.
    pub fn check_availability(&self, match_id: MatchId, session: &OperatorSession) -> Result<bool> {
        // Existence check first so an unknown id is NotFound, not available
        self.store.get(match_id)?;

        match self.locks.holder(match_id) {
            Some(lock) if lock.operator_id != session.operator_id => {
                Err(OpsError::Conflict { holder: lock.operator_name.clone() })
            }
            _ => Ok(true),
        }
    }

    /// Create a match record. Required fields are re-validated here; the
    /// kickoff instant is composed from the payload's date and time parts.
    pub fn create_match(&mut self, data: &NewMatch) -> Result<MatchRecord> {
        let record = self.store.create(data)?;
        log::info!("Created match {} ({})", record.id, record.scoreline());
        Ok(record)
    }

    /// Begin operating a match. Branches on status:
    ///
    /// - `Upcoming`: acquires the operator lock (atomic insert-if-absent)
    ///   and returns a fresh setup wizard.
    /// - `Live`: returns the record for scoreboard viewing WITHOUT touching
    ///   the lock table.
    /// - `Completed`: rejected, there is nothing left to operate.
    pub fn initialize_setup(
        &mut self,
        match_id: MatchId,
        session: &OperatorSession,
    ) -> Result<SetupHandle> {
        let record = self.store.get(match_id)?;

        match record.status {
            MatchStatus::Upcoming => {
                self.locks.acquire(match_id, session)?;
                self.active.insert(session.operator_id, match_id);
                log::info!(
                    "Operator {} locked match {} for setup",
                    session.operator_name,
                    match_id
                );
                Ok(SetupHandle::Setup(SetupWizard::new(match_id)))
            }
            MatchStatus::Live => Ok(SetupHandle::Scoreboard(Box::new(record))),
            MatchStatus::Completed => Err(OpsError::Validation(format!(
                "match {} is completed and cannot be operated",
                match_id
            ))),
        }
    }

    /// Transition `Upcoming → Live` with the wizard's setup payload.
    ///
    /// The caller's lock is re-affirmed atomically here, closing the gap
    /// between the earlier availability check and this write. Calling this
    /// on a match the caller already took live returns it unchanged; the
    /// transition never runs backward. On store failure the match stays
    /// `Upcoming` and the lock stays held, so the operator can retry.
    pub fn start_live_match(
        &mut self,
        match_id: MatchId,
        setup: MatchSetup,
        session: &OperatorSession,
    ) -> Result<MatchRecord> {
        self.locks.acquire(match_id, session)?;

        let mut record = self.store.get(match_id)?;
        match record.status {
            MatchStatus::Live => return Ok(record), // retry after a raced success
            MatchStatus::Completed => {
                return Err(OpsError::Validation(format!(
                    "match {} is completed and cannot go live",
                    match_id
                )))
            }
            MatchStatus::Upcoming => {}
        }

        record.home.roster = setup.home_roster;
        record.away.roster = setup.away_roster;
        record.officials = setup.officials;
        record.settings = setup.settings;
        record.status = MatchStatus::Live;
        record.kickoff = chrono::Utc::now();

        let updated = self.store.update(&record)?;
        self.active.insert(session.operator_id, match_id);
        log::info!("Match {} is live: {}", match_id, updated.scoreline());
        Ok(updated)
    }

    /// Overwrite both scores. Non-live matches are not rejected (the store
    /// is the authority on corrections after the fact), only logged.
    pub fn update_score(&mut self, match_id: MatchId, update: ScoreUpdate) -> Result<MatchRecord> {
        let mut record = self.store.get(match_id)?;

        if record.status != MatchStatus::Live {
            log::warn!(
                "Score update on non-live match {} (status {})",
                match_id,
                record.status
            );
        }

        record.home.score = update.home_score;
        record.away.score = update.away_score;
        self.store.update(&record)
    }

    /// Append an event to the match log. Goal events also move the score.
    /// Events are only recordable while the match is live.
    pub fn record_event(&mut self, match_id: MatchId, event: MatchEvent) -> Result<MatchRecord> {
        let mut record = self.store.get(match_id)?;

        if record.status != MatchStatus::Live {
            return Err(OpsError::Validation(format!(
                "events can only be recorded on a live match, {} is {}",
                match_id, record.status
            )));
        }

        if let MatchEvent::Goal { side, .. } = &event {
            record.team_mut(*side).score += 1;
        }
        record.events.push(event);
        self.store.update(&record)
    }

    /// Release the caller's operator lock and close their active view.
    ///
    /// Idempotent: no lock held is a no-op. A lock held by a different
    /// operator is left alone. Never changes match status; a live match
    /// stays live for another operator to resume.
    pub fn end_match_management(&mut self, match_id: MatchId, session: &OperatorSession) {
        if self.locks.is_held_by(match_id, session.operator_id) {
            self.locks.release(match_id);
            log::info!(
                "Operator {} released match {}",
                session.operator_name,
                match_id
            );
        }
        // Only close the view if it is actually showing this match
        if self.active.get(&session.operator_id) == Some(&match_id) {
            self.active.remove(&session.operator_id);
        }
    }

    /// Explicit terminal transition `Live → Completed`. Requires the
    /// caller's lock; releases it afterwards.
    pub fn complete_match(
        &mut self,
        match_id: MatchId,
        session: &OperatorSession,
    ) -> Result<MatchRecord> {
        self.locks.acquire(match_id, session)?;

        let mut record = self.store.get(match_id)?;
        if !record.status.can_transition_to(MatchStatus::Completed) {
            return Err(OpsError::Validation(format!(
                "match {} cannot complete from status {}",
                match_id, record.status
            )));
        }

        record.status = MatchStatus::Completed;
        let updated = self.store.update(&record)?;

        self.end_match_management(match_id, session);
        log::info!("Match {} completed: {}", match_id, updated.scoreline());
        Ok(updated)
    }
}
