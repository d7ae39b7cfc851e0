//! Drag gesture state machine.
//!
//! ```text
//! Idle ──Start──▶ Dragging ──End(target)──▶ Dropped ──┐
//!                    │  ▲                              │
//!                    └──┘ Over (optimistic moves)      ├──▶ Idle (reset / next Start)
//!                    └────────End(None)──▶ Cancelled ──┘
//! ```
//!
//! The controller turns pointer-level events into board mutations and a
//! [`DragOutcome`]. It never talks to the remote store: a cross-column drop
//! is reported as [`DragOutcome::Moved`] for the reconciler to commit.

use funil_core::enums::FunnelStage;

use crate::board::Board;
use crate::error::BoardError;

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A column container, by column id.
    Column(String),
    /// Another lead card, by lead id.
    Lead(String),
}

/// Pointer-level input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { lead_id: String },
    Over { target: DropTarget },
    /// `None` when released outside any valid target.
    End { target: Option<DropTarget> },
}

/// The gesture in flight and where it began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub lead_id: String,
    pub origin: FunnelStage,
    pub origin_index: usize,
}

/// A drop that changed the lead's column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossColumnMove {
    pub lead_id: String,
    pub from: FunnelStage,
    pub origin_index: usize,
    pub to: FunnelStage,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Column changed; needs a remote commit.
    Moved(CrossColumnMove),
    /// Same column, new position. Local only.
    Reordered {
        lead_id: String,
        stage: FunnelStage,
        from_index: usize,
        to_index: usize,
    },
    /// Dropped back where it started.
    Unchanged { lead_id: String, stage: FunnelStage },
}

impl DragOutcome {
    #[must_use]
    pub fn lead_id(&self) -> &str {
        match self {
            Self::Moved(mv) => &mv.lead_id,
            Self::Reordered { lead_id, .. } | Self::Unchanged { lead_id, .. } => lead_id,
        }
    }
}

/// A gesture released over nothing. The board keeps whatever optimistic
/// placement hovering produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    pub lead_id: String,
    pub origin: FunnelStage,
    pub origin_index: usize,
    /// Where the lead sits now, `None` if it left the board mid-gesture.
    pub current: Option<(FunnelStage, usize)>,
}

impl Cancellation {
    /// Hovering moved the lead out of its origin column and nothing will
    /// commit that.
    #[must_use]
    pub fn is_stranded(&self) -> bool {
        self.current
            .is_some_and(|(stage, _)| stage != self.origin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
    Dropped(DragOutcome),
    Cancelled(Cancellation),
}

/// Result of feeding one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Started,
    /// `true` when the hover moved the lead into another column.
    Hovered { moved: bool },
    Dropped(DragOutcome),
    Cancelled(Cancellation),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Forget a finished gesture.
    pub fn reset(&mut self) {
        if !self.is_dragging() {
            self.state = DragState::Idle;
        }
    }

    /// Abandon whatever is in progress without touching the board.
    pub fn abort(&mut self) {
        self.state = DragState::Idle;
    }

    /// Apply one pointer event to the board.
    ///
    /// # Errors
    ///
    /// - [`BoardError::GestureInProgress`] on `Start` while dragging
    /// - [`BoardError::LeadNotFound`] on `Start` for a lead not on the board,
    ///   or when the dragged lead disappeared before the drop
    /// - [`BoardError::NoActiveGesture`] on `Over`/`End` while not dragging
    pub fn handle(&mut self, board: &mut Board, event: DragEvent) -> Result<Transition, BoardError> {
        match event {
            DragEvent::Start { lead_id } => self.start(board, lead_id),
            DragEvent::Over { target } => {
                let active = self.active()?.clone();
                let moved = hover(board, &active.lead_id, &target)?;
                Ok(Transition::Hovered { moved })
            }
            DragEvent::End { target } => {
                let active = self.active()?.clone();
                let resolved = target
                    .as_ref()
                    .and_then(|target| board.resolve_target(target).map(|at| (target, at)));
                let Some((target, (stage, hovered))) = resolved else {
                    return Ok(self.cancel(board, active));
                };
                match drop_on(board, &active, target, stage, hovered) {
                    Ok(outcome) => {
                        tracing::debug!(lead_id = %active.lead_id, ?outcome, "drag dropped");
                        self.state = DragState::Dropped(outcome.clone());
                        Ok(Transition::Dropped(outcome))
                    }
                    Err(error) => {
                        self.state = DragState::Idle;
                        Err(error)
                    }
                }
            }
        }
    }

    fn start(&mut self, board: &Board, lead_id: String) -> Result<Transition, BoardError> {
        if let DragState::Dragging(active) = &self.state {
            return Err(BoardError::GestureInProgress {
                active: active.lead_id.clone(),
            });
        }
        let (origin, origin_index) = board
            .locate(&lead_id)
            .ok_or_else(|| BoardError::LeadNotFound(lead_id.clone()))?;

        tracing::debug!(%lead_id, column = origin.column_id(), "drag started");
        self.state = DragState::Dragging(ActiveDrag {
            lead_id,
            origin,
            origin_index,
        });
        Ok(Transition::Started)
    }

    fn active(&self) -> Result<&ActiveDrag, BoardError> {
        match &self.state {
            DragState::Dragging(active) => Ok(active),
            _ => Err(BoardError::NoActiveGesture),
        }
    }

    fn cancel(&mut self, board: &Board, active: ActiveDrag) -> Transition {
        let cancellation = Cancellation {
            current: board.locate(&active.lead_id),
            lead_id: active.lead_id,
            origin: active.origin,
            origin_index: active.origin_index,
        };
        tracing::debug!(
            lead_id = %cancellation.lead_id,
            stranded = cancellation.is_stranded(),
            "drag cancelled"
        );
        self.state = DragState::Cancelled(cancellation.clone());
        Transition::Cancelled(cancellation)
    }
}

/// Optimistic cross-column move while hovering. Hovering within the lead's
/// current column, over itself, or over nothing resolvable changes nothing.
fn hover(board: &mut Board, lead_id: &str, target: &DropTarget) -> Result<bool, BoardError> {
    if matches!(target, DropTarget::Lead(id) if id == lead_id) {
        return Ok(false);
    }
    let Some((stage, hovered)) = board.resolve_target(target) else {
        return Ok(false);
    };
    let (current, _) = board
        .locate(lead_id)
        .ok_or_else(|| BoardError::LeadNotFound(lead_id.to_string()))?;
    if current == stage {
        return Ok(false);
    }

    let index = hovered.unwrap_or_else(|| board.column(stage).len());
    let at = board.move_lead(lead_id, current, stage, index)?;
    tracing::trace!(lead_id, column = stage.column_id(), index = at, "optimistic hover move");
    Ok(true)
}

fn drop_on(
    board: &mut Board,
    active: &ActiveDrag,
    target: &DropTarget,
    stage: FunnelStage,
    hovered: Option<usize>,
) -> Result<DragOutcome, BoardError> {
    let lead_id = active.lead_id.as_str();

    // Catch up if no hover event reached the target column.
    hover(board, lead_id, target)?;

    // Dropped on another card in the same column: take its slot.
    if let DropTarget::Lead(over_id) = target
        && over_id != lead_id
        && hovered.is_some()
        && let Some((current, from)) = board.locate(lead_id)
        && let Some(to) = board.column(stage).position(over_id)
        && current == stage
        && from != to
    {
        board.move_lead(lead_id, stage, stage, to)?;
    }

    let (stage, index) = board
        .locate(lead_id)
        .ok_or_else(|| BoardError::LeadNotFound(lead_id.to_string()))?;

    Ok(if stage != active.origin {
        DragOutcome::Moved(CrossColumnMove {
            lead_id: lead_id.to_string(),
            from: active.origin,
            origin_index: active.origin_index,
            to: stage,
            index,
        })
    } else if index != active.origin_index {
        DragOutcome::Reordered {
            lead_id: lead_id.to_string(),
            stage,
            from_index: active.origin_index,
            to_index: index,
        }
    } else {
        DragOutcome::Unchanged {
            lead_id: lead_id.to_string(),
            stage,
        }
    })
}
