//! # Engine Error Types
//!
//! Error types for the calculation engine.
//!
//! The worker itself never fails: it has no I/O and its arithmetic runs on
//! pre-validated items. What can go wrong is at the edges, a controller
//! sending to a worker that already exited, or a bad configuration.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The worker has exited and dropped its end of the task channel.
    ///
    /// ## When This Occurs
    /// - A task is sent after the worker processed `Stop`
    /// - The worker task was aborted with its runtime
    #[error("Task channel closed: worker is not running")]
    ChannelClosed,

    /// Invalid worker configuration.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),
}
