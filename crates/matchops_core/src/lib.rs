//! # matchops_core - Match Operator Core
//!
//! Lifecycle, locking and live-scoreboard core for the sports-ministry
//! match operator console.
//!
//! ## Features
//! - Strict match lifecycle: UPCOMING → LIVE → COMPLETED, never backward
//! - Single-operator exclusivity per match via an atomic lock table
//! - Append-only scoreboard event log with typed event kinds
//! - Three-step setup wizard modeled as an explicit state machine
//! - Pluggable match store (in-memory, JSON file) behind one trait
//! - JSON request/response boundary for embedding layers

pub mod api;
pub mod error;
pub mod lock;
pub mod manager;
pub mod models;
pub mod session;
pub mod store;
pub mod wizard;

pub use error::{OpsError, Result};
pub use lock::{LockTable, OperatorLock};
pub use manager::{LifecycleManager, ScoreUpdate, SetupHandle};
pub use models::{
    GameSettings, GameType, MatchEvent, MatchId, MatchRecord, MatchSetup, MatchStatus, NewMatch,
    OfficialRole, RosterPlayer, TeamSheet, TeamSide,
};
pub use session::{OperatorId, OperatorSession};
pub use store::{FileStore, MatchStore, MemoryStore};
pub use wizard::{OfficialsDraft, SetupWizard, TeamSetupDraft, WizardStep};
