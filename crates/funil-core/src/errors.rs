//! Cross-cutting error types for funil.
//!
//! Domain-specific errors (`StoreError`, `BoardError`, `ConfigError`) live in
//! their own crates. The CLI converges everything through `anyhow`.

use thiserror::Error;

/// Errors raised while mapping between stage names and board columns.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted funnel stage name that is not one of the six known stages.
    #[error("Unknown funnel stage: {0:?}")]
    UnknownStage(String),

    /// A board column identifier with no stage mapping.
    #[error("Unknown board column: {0:?}")]
    UnknownColumn(String),
}
