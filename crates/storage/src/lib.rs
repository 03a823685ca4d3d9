//! Storage Layer
//!
//! Persists saved predictions to a flat CSV file.

mod history;

pub use history::{HistoryRecord, HistoryStore, HISTORY_COLUMNS};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] csv::Error),
}
