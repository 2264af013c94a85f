use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Match not found: {match_id}")]
    NotFound { match_id: String },

    #[error("Match is already managed by {holder}")]
    Conflict { holder: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

impl OpsError {
    /// Whether the caller can reasonably retry the same operation.
    pub fn is_recoverable(&self) -> bool {
        match self {
            OpsError::Network(_) => true,
            OpsError::Io(_) => true,
            OpsError::Conflict { .. } => true, // Holder may release
            OpsError::NotFound { .. } => false,
            OpsError::Validation(_) => false,
            OpsError::Serialization(_) => false,
            OpsError::VersionMismatch { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
