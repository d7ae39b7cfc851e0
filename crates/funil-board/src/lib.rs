//! # funil-board
//!
//! Keeps the lead-funnel kanban board in step with the remote lead table.
//!
//! - [`Board`]: leads partitioned into the six stage columns, in fetch order
//! - [`DragController`]: the drag gesture as an explicit state machine
//! - [`Reconciler`]: turns a cross-column drop into one remote stage write
//! - [`BoardSession`]: owns all of the above and applies the
//!   [`DivergencePolicy`](funil_core::enums::DivergencePolicy) when a write
//!   fails
//! - [`summarize`]: dashboard funnel metrics
//!
//! Reordering inside a column is local only; only the stage is persisted.

pub mod board;
pub mod drag;
pub mod error;
pub mod notify;
pub mod reconcile;
pub mod session;
pub mod summary;

pub use board::{Board, Column, LoadReport, LoadWarning};
pub use drag::{DragController, DragEvent, DragOutcome, DragState, DropTarget};
pub use error::BoardError;
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use reconcile::{CommitReport, CommitRequest, CommitStatus, Reconciler};
pub use session::{BoardSession, GestureReport, SessionOptions, Settlement};
pub use summary::summarize;
