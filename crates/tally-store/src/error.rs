//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path context and categorization       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in apps/cli) ← Printed as a warning, order left untouched   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::CoreError;
use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order file does not exist yet.
    #[error("Order file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing the file failed.
    ///
    /// ## When This Occurs
    /// - Permission denied
    /// - Parent directory could not be created
    /// - Disk full during save
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or lacks required fields.
    #[error("Malformed order data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON parsed but a record breaks the line item rules.
    #[error("Invalid order record: {0}")]
    InvalidRecord(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    ///
    /// `NotFound` is split out so callers can treat "nothing saved yet"
    /// differently from a real failure.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path)
        } else {
            StoreError::Io { path, source }
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
