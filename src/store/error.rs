//! Persistence Errors
//!
//! Error types for state file operations. These are logged, never
//! returned to HTTP callers.

/// Errors that can occur while loading or saving ledger state
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    /// Check if the state file exists but holds something other than a ledger document
    pub fn is_corrupt_document(&self) -> bool {
        matches!(self, PersistenceError::Serialization(_))
    }
}
