//! # Application Error Type
//!
//! Unified error type for controller commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Menu                        Command                                    │
//! │  ────                        ───────                                    │
//! │                                                                         │
//! │  "2) Add item"                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ───── ValidationError ───────────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  File problem? ── StoreError ──────────────────► AppError ─────►│  │
//! │  │         │                                         ▲              │  │
//! │  │         ▼                                         │              │  │
//! │  │  Worker gone? ─── EngineError ───────────────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The menu prints "Warning: <message>" and keeps running. None of       │
//! │  these errors end the process.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use tally_core::{CoreError, ValidationError};
use tally_engine::EngineError;
use tally_store::StoreError;

use crate::state::ConfigError;

/// Error returned from controller commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Machine-readable category
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// User input rejected at the controller boundary
    InvalidInput,

    /// Order file does not exist
    NotFound,

    /// Order file could not be read, written or decoded
    StorageError,

    /// The calculation worker is not accepting tasks
    WorkerUnavailable,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Returns the code as a stable upper-case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::WorkerUnavailable => "WORKER_UNAVAILABLE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type alias for commands.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::invalid_input(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::invalid_input(err.to_string())
    }
}

/// Converts store errors, keeping the detail in the log only for I/O.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => AppError::new(
                ErrorCode::NotFound,
                format!("No saved order at {}", path.display()),
            ),
            StoreError::Io { ref path, ref source } => {
                tracing::error!(path = %path.display(), error = %source, "Order file I/O failed");
                AppError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::Parse(_) | StoreError::InvalidRecord(_) => {
                AppError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ChannelClosed => {
                AppError::new(ErrorCode::WorkerUnavailable, "Calculation worker is not running")
            }
            EngineError::InvalidConfig(msg) => AppError::new(ErrorCode::ConfigError, msg),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}
