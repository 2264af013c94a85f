//! Match store abstraction.
//!
//! The lifecycle manager talks to the store through `MatchStore`; the
//! reference deployment uses `MemoryStore`, the operator console persists
//! through `FileStore`.

pub mod file;
pub mod memory;

use crate::error::Result;
use crate::models::{MatchId, MatchRecord, NewMatch};

pub use file::FileStore;
pub use memory::MemoryStore;

/// CRUD surface of the match store. Mirrors the backend endpoints
/// (`GET /matches`, `POST /matches`, `PUT /matches/{id}`).
pub trait MatchStore {
    /// All match records, store-defined order. Callers filter by status.
    fn list(&self) -> Result<Vec<MatchRecord>>;

    fn get(&self, id: MatchId) -> Result<MatchRecord>;

    /// Create a record with a store-assigned id, status `Upcoming` and
    /// zeroed scores.
    fn create(&mut self, data: &NewMatch) -> Result<MatchRecord>;

    /// Replace the stored record for `record.id`.
    fn update(&mut self, record: &MatchRecord) -> Result<MatchRecord>;
}
