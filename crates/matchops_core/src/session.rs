//! Operator identity, as supplied by the session layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(pub Uuid);

impl OperatorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current operator's identity. Read synchronously; the session layer
/// that produces it (auth, token storage) is outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSession {
    pub operator_id: OperatorId,
    pub operator_name: String,
}

impl OperatorSession {
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self { operator_id: OperatorId::new(), operator_name: operator_name.into() }
    }
}
