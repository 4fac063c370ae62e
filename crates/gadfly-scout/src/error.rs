//! Error types for scout operations

use thiserror::Error;

/// Errors that can occur during scout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
