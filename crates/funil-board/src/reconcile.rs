//! Commits cross-column drops to the remote lead store.

use std::sync::Arc;

use funil_core::enums::FunnelStage;
use funil_store::LeadStore;

use crate::drag::CrossColumnMove;
use crate::notify::{Notification, Notifier};

/// A stage write to send for one lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub lead_id: String,
    /// Destination column id, mapped to a stage at commit time.
    pub column_id: String,
    pub origin: FunnelStage,
    pub origin_index: usize,
}

impl From<&CrossColumnMove> for CommitRequest {
    fn from(mv: &CrossColumnMove) -> Self {
        Self {
            lead_id: mv.lead_id.clone(),
            column_id: mv.to.column_id().to_string(),
            origin: mv.from,
            origin_index: mv.origin_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Committed { stage: FunnelStage },
    Failed { stage: FunnelStage, error: String },
    /// The column id maps to no stage; nothing was sent.
    Skipped,
}

impl CommitStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Committed { .. } => "committed",
            Self::Failed { .. } => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub request: CommitRequest,
    pub status: CommitStatus,
}

/// Sends one `funnel_stage` update per cross-column drop and tells the user
/// how it went.
pub struct Reconciler<S: ?Sized, N: ?Sized> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S: ?Sized, N: ?Sized> Clone for Reconciler<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S, N> Reconciler<S, N>
where
    S: LeadStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub const fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Write the destination stage. One attempt, no retry; the outcome is
    /// both returned and announced through the notifier. The board is not
    /// touched here.
    pub async fn commit(&self, request: CommitRequest) -> CommitReport {
        let Some(stage) = FunnelStage::from_column_id(&request.column_id) else {
            tracing::debug!(
                lead_id = %request.lead_id,
                column = %request.column_id,
                "no stage for column, skipping commit"
            );
            return CommitReport {
                request,
                status: CommitStatus::Skipped,
            };
        };

        let status = match self.store.update_funnel_stage(&request.lead_id, stage).await {
            Ok(()) => {
                tracing::info!(lead_id = %request.lead_id, %stage, "funnel stage committed");
                self.notifier.notify(Notification::success(format!(
                    "Lead {} moved to {stage}",
                    request.lead_id
                )));
                CommitStatus::Committed { stage }
            }
            Err(error) => {
                tracing::warn!(lead_id = %request.lead_id, %stage, %error, "funnel stage commit failed");
                self.notifier.notify(Notification::error(format!(
                    "Could not move lead {} to {stage}: {error}",
                    request.lead_id
                )));
                CommitStatus::Failed {
                    stage,
                    error: error.to_string(),
                }
            }
        };

        CommitReport { request, status }
    }
}
