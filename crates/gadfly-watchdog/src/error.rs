//! Error types for watchdog operations

use thiserror::Error;

/// Errors that can occur during watchdog operations
#[derive(Error, Debug)]
pub enum WatchdogError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
