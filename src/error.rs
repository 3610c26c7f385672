//! Error type shared by the scheduler, the stores and the repository.

/// Errors surfaced to callers of the engine
#[derive(Debug, thiserror::Error)]
pub enum SrsError {
    /// Rating outside Again(0)..=Easy(3)
    #[error("Invalid rating: {0} (expected 0-3)")]
    InvalidRating(u8),
    /// SQLite persistence error
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    /// Snapshot (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SrsError>;
