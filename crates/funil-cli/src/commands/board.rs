use std::sync::Arc;

use anyhow::{Context, bail};
use funil_board::{
    BoardSession, CommitStatus, DragEvent, DragOutcome, DragState, DropTarget, GestureReport,
    Notification, Notifier, RecordingNotifier, TracingNotifier,
};
use funil_core::enums::FunnelStage;
use funil_core::errors::CoreError;
use funil_core::responses::{BoardView, MoveResponse};
use funil_store::LeadStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{BoardCommands, MoveArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

type Session = BoardSession<dyn LeadStore, RecordingNotifier>;

/// Handle `funil board`.
pub async fn handle(
    action: &BoardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = ctx.session(Arc::clone(&notifier));

    match action {
        BoardCommands::Show => {
            let (view, loaded) = show(&mut session).await;
            for notification in notifier.take() {
                print_toast(notification, flags);
            }
            output(&view, flags.format)?;
            loaded
        }
        BoardCommands::Move(args) => {
            load(&mut session).await?;
            run_move(args, &mut session, &notifier, flags).await
        }
    }
}

/// A failed fetch still yields the emptied board so it renders next to the
/// error toast.
async fn show(session: &mut Session) -> (BoardView, anyhow::Result<()>) {
    let loaded = load(session).await;
    (session.view(), loaded)
}

async fn load(session: &mut Session) -> anyhow::Result<()> {
    let progress = Progress::spinner("Loading board...");
    match session.load().await {
        Ok(report) => {
            progress.finish_clear();
            tracing::debug!(placed = report.placed, "board ready");
            Ok(())
        }
        Err(error) => {
            progress.finish_err("load failed");
            Err(error).context("failed to load the board")
        }
    }
}

async fn run_move(
    args: &MoveArgs,
    session: &mut Session,
    notifier: &RecordingNotifier,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let events = gesture(args, session)?;

    let progress = Progress::spinner("Moving lead...");
    let report = session.drag(events).await;
    progress.finish_clear();
    let report = report.with_context(|| format!("failed to move lead {}", args.lead_id))?;

    let failed = matches!(
        report.commit.as_ref().map(|commit| &commit.status),
        Some(CommitStatus::Failed { .. })
    );
    let response = move_response(&args.lead_id, &report, session, notifier);
    output(&response, flags.format)?;

    if failed {
        bail!("stage change for lead {} was not saved", args.lead_id);
    }
    Ok(())
}

/// The pointer events a user would produce dragging the card onto the
/// destination column, then onto `--over` if given.
fn gesture(args: &MoveArgs, session: &Session) -> anyhow::Result<Vec<DragEvent>> {
    if FunnelStage::from_column_id(&args.to).is_none() {
        return Err(CoreError::UnknownColumn(args.to.clone()))
            .context("run `funil stages` for valid column ids");
    }
    if session.board().locate(&args.lead_id).is_none() {
        bail!("lead {} is not on the board", args.lead_id);
    }

    let mut events = vec![
        DragEvent::Start {
            lead_id: args.lead_id.clone(),
        },
        DragEvent::Over {
            target: DropTarget::Column(args.to.clone()),
        },
    ];

    let target = match &args.over {
        None => DropTarget::Column(args.to.clone()),
        Some(over) => {
            let column = session
                .board()
                .locate(over)
                .map(|(stage, _)| stage.column_id());
            if column != Some(args.to.as_str()) {
                bail!("lead {over} is not in column {}", args.to);
            }
            events.push(DragEvent::Over {
                target: DropTarget::Lead(over.clone()),
            });
            DropTarget::Lead(over.clone())
        }
    };
    events.push(DragEvent::End {
        target: Some(target),
    });
    Ok(events)
}

fn move_response(
    lead_id: &str,
    report: &GestureReport,
    session: &Session,
    notifier: &RecordingNotifier,
) -> MoveResponse {
    let (outcome, from, to) = match &report.state {
        DragState::Dropped(DragOutcome::Moved(mv)) => ("moved", Some(mv.from), Some(mv.to)),
        DragState::Dropped(DragOutcome::Reordered { stage, .. }) => {
            ("reordered", Some(*stage), Some(*stage))
        }
        DragState::Dropped(DragOutcome::Unchanged { stage, .. }) => {
            ("unchanged", Some(*stage), Some(*stage))
        }
        DragState::Cancelled(cancellation) => (
            "cancelled",
            Some(cancellation.origin),
            cancellation.current.map(|(stage, _)| stage),
        ),
        DragState::Idle | DragState::Dragging(_) => ("none", None, None),
    };

    MoveResponse {
        lead_id: lead_id.to_string(),
        outcome: outcome.to_string(),
        from_column: from.map(|stage| stage.column_id().to_string()),
        to_column: to.map(|stage| stage.column_id().to_string()),
        index: session.board().locate(lead_id).map(|(_, index)| index),
        commit: report
            .commit
            .as_ref()
            .map(|commit| commit.status.as_str().to_string()),
        notifications: notifier
            .take()
            .iter()
            .map(ToString::to_string)
            .collect(),
        board: session.view(),
    }
}

/// Toasts go to stderr; under `--quiet` they only reach the log.
fn print_toast(notification: Notification, flags: &GlobalFlags) {
    if flags.quiet {
        TracingNotifier.notify(notification);
    } else {
        eprintln!("{notification}");
    }
}
