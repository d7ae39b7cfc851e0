//! The board page: owns board state, the drag gesture, and the reconciler.

use std::sync::Arc;

use funil_core::enums::{DivergencePolicy, FunnelStage};
use funil_core::responses::BoardView;
use funil_store::LeadStore;

use crate::board::{Board, LoadReport, LoadWarning};
use crate::drag::{Cancellation, DragController, DragEvent, DragOutcome, DragState, Transition};
use crate::error::BoardError;
use crate::notify::{Notification, Notifier};
use crate::reconcile::{CommitReport, CommitRequest, CommitStatus, Reconciler};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Owner whose leads are fetched.
    pub user_id: String,
    pub policy: DivergencePolicy,
    /// Turn unknown-stage rows into warning notifications on load.
    pub warn_unknown_stages: bool,
}

/// What [`BoardSession::settle`] did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Remote write confirmed the placement.
    Confirmed,
    /// Placement kept and flagged pending until the next load.
    KeptPending,
    /// Lead returned to where the gesture started.
    RolledBack { stage: FunnelStage, index: usize },
    /// Write landed after a later gesture moved the lead elsewhere; the lead
    /// is flagged pending until the next load.
    Superseded,
    /// Nothing to apply.
    Unchanged,
}

/// Everything one [`BoardSession::drag`] call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureReport {
    pub state: DragState,
    pub commit: Option<CommitReport>,
    pub settlement: Option<Settlement>,
}

pub struct BoardSession<S: ?Sized, N: ?Sized> {
    board: Board,
    drag: DragController,
    reconciler: Reconciler<S, N>,
    store: Arc<S>,
    notifier: Arc<N>,
    options: SessionOptions,
    warnings: Vec<LoadWarning>,
}

impl<S, N> BoardSession<S, N>
where
    S: LeadStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, options: SessionOptions) -> Self {
        Self {
            board: Board::new(),
            drag: DragController::new(),
            reconciler: Reconciler::new(Arc::clone(&store), Arc::clone(&notifier)),
            store,
            notifier,
            options,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Handle for running commits off the event path.
    #[must_use]
    pub const fn reconciler(&self) -> &Reconciler<S, N> {
        &self.reconciler
    }

    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn view(&self) -> BoardView {
        self.board.view(&self.warnings)
    }

    /// Fetch the user's leads and rebuild the board. Any gesture in flight
    /// is dropped.
    ///
    /// On failure the board is left empty, the user is notified, and nothing
    /// is retried.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Fetch`] if the store cannot be read.
    pub async fn load(&mut self) -> Result<LoadReport, BoardError> {
        self.drag.abort();
        self.warnings.clear();

        let leads = match self.store.fetch_leads(&self.options.user_id).await {
            Ok(leads) => leads,
            Err(error) => {
                tracing::error!(user_id = %self.options.user_id, %error, "lead fetch failed");
                self.board.clear();
                self.notifier
                    .notify(Notification::error(format!("Could not load leads: {error}")));
                return Err(BoardError::Fetch(error));
            }
        };

        let report = self.board.load(leads);
        if self.options.warn_unknown_stages {
            for warning in &report.warnings {
                if matches!(warning, LoadWarning::UnknownStage { .. }) {
                    self.notifier.notify(Notification::warning(warning.to_string()));
                }
            }
        }
        self.warnings.clone_from(&report.warnings);
        Ok(report)
    }

    /// Apply one pointer event. Returns the commit to run when the event
    /// completed a cross-column drop.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] from the drag controller.
    pub fn handle(&mut self, event: DragEvent) -> Result<Option<CommitRequest>, BoardError> {
        match self.drag.handle(&mut self.board, event)? {
            Transition::Dropped(DragOutcome::Moved(mv)) => Ok(Some(CommitRequest::from(&mv))),
            Transition::Cancelled(cancellation) if cancellation.is_stranded() => {
                self.strand(&cancellation);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Fold a finished commit back into the board.
    pub fn settle(&mut self, report: &CommitReport) -> Settlement {
        let lead_id = report.request.lead_id.as_str();
        match &report.status {
            CommitStatus::Committed { stage } => {
                if self.board.locate(lead_id).map(|(current, _)| current) != Some(*stage) {
                    tracing::warn!(lead_id, stage = %stage, "write confirmed after the lead moved again");
                    self.board.mark_pending(lead_id);
                    return Settlement::Superseded;
                }
                self.board.mark_committed(lead_id, *stage);
                Settlement::Confirmed
            }
            CommitStatus::Skipped => Settlement::Unchanged,
            CommitStatus::Failed { stage, .. } => match self.options.policy {
                DivergencePolicy::KeepPending => {
                    self.board.mark_pending(lead_id);
                    Settlement::KeptPending
                }
                DivergencePolicy::Rollback => self.roll_back(
                    lead_id,
                    *stage,
                    report.request.origin,
                    report.request.origin_index,
                ),
            },
        }
    }

    /// Feed a whole gesture, committing and settling any cross-column drop.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] from the drag controller; the gesture is
    /// abandoned in that case.
    pub async fn drag(
        &mut self,
        events: impl IntoIterator<Item = DragEvent>,
    ) -> Result<GestureReport, BoardError> {
        let mut commit = None;
        let mut settlement = None;

        for event in events {
            let request = match self.handle(event) {
                Ok(request) => request,
                Err(error) => {
                    self.drag.abort();
                    return Err(error);
                }
            };
            if let Some(request) = request {
                let report = self.reconciler.commit(request).await;
                settlement = Some(self.settle(&report));
                commit = Some(report);
            }
        }

        Ok(GestureReport {
            state: self.drag.state().clone(),
            commit,
            settlement,
        })
    }

    fn strand(&mut self, cancellation: &Cancellation) {
        let Some((stage, _)) = cancellation.current else {
            return;
        };
        match self.options.policy {
            DivergencePolicy::KeepPending => {
                tracing::debug!(lead_id = %cancellation.lead_id, "cancelled gesture left lead pending");
                self.board.mark_pending(&cancellation.lead_id);
            }
            DivergencePolicy::Rollback => {
                self.roll_back(
                    &cancellation.lead_id,
                    stage,
                    cancellation.origin,
                    cancellation.origin_index,
                );
            }
        }
    }

    /// Only undoes the move while the lead still sits where the failed
    /// write would have put it; a later gesture wins.
    fn roll_back(
        &mut self,
        lead_id: &str,
        from: FunnelStage,
        origin: FunnelStage,
        origin_index: usize,
    ) -> Settlement {
        match self.board.move_lead(lead_id, from, origin, origin_index) {
            Ok(index) => {
                tracing::info!(lead_id, column = origin.column_id(), index, "placement rolled back");
                self.board.clear_pending(lead_id);
                Settlement::RolledBack {
                    stage: origin,
                    index,
                }
            }
            Err(error) => {
                tracing::warn!(lead_id, %error, "lead moved since the gesture, not rolling back");
                Settlement::Unchanged
            }
        }
    }
}
