//! Error types for adversarial review

use thiserror::Error;

/// Errors that can occur during a review
///
/// Reasoning-service failures never appear here: they degrade to fallback
/// text inside the report.
#[derive(Error, Debug)]
pub enum AdvocateError {
    /// The vault has no entries to review
    #[error("Vault is empty: nothing to review")]
    EmptyVault,

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
