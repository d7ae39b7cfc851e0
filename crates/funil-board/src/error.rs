//! Board error types.

use funil_store::StoreError;
use thiserror::Error;

/// Errors raised while loading the board or interpreting a drag gesture.
#[derive(Debug, Error)]
pub enum BoardError {
    /// No column holds a lead with this id.
    #[error("lead not on board: {0}")]
    LeadNotFound(String),

    /// The lead is on the board but not in the column the caller named.
    #[error("lead {lead_id} is not in column {column}")]
    LeadNotInColumn { lead_id: String, column: String },

    /// Inserting would put the same lead in two places.
    #[error("lead already on board: {0}")]
    DuplicateLead(String),

    /// A new gesture started before the previous one ended.
    #[error("drag already in progress for lead {active}")]
    GestureInProgress { active: String },

    /// A hover or drop arrived with no gesture in progress.
    #[error("no drag in progress")]
    NoActiveGesture,

    /// Fetching leads from the remote store failed.
    #[error("failed to fetch leads: {0}")]
    Fetch(#[from] StoreError),
}
