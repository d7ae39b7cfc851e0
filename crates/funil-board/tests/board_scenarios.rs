//! End-to-end board flows against the in-memory store.

use std::sync::Arc;

use funil_board::notify::Level;
use funil_board::{
    BoardSession, CommitStatus, DragEvent, DragOutcome, DragState, DropTarget, RecordingNotifier,
    SessionOptions, Settlement,
};
use funil_core::entities::Lead;
use funil_core::enums::{DivergencePolicy, FunnelStage};
use funil_store::MemoryLeadStore;
use pretty_assertions::assert_eq;

type Session = BoardSession<MemoryLeadStore, RecordingNotifier>;

async fn loaded(leads: Vec<Lead>) -> (Arc<MemoryLeadStore>, Arc<RecordingNotifier>, Session) {
    let store = Arc::new(MemoryLeadStore::new(leads));
    let notifier = Arc::new(RecordingNotifier::new());
    let mut session = BoardSession::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        SessionOptions {
            user_id: "corretor-1".into(),
            policy: DivergencePolicy::KeepPending,
            warn_unknown_stages: true,
        },
    );
    session.load().await.unwrap();
    (store, notifier, session)
}

fn columns(session: &Session) -> Vec<(&'static str, Vec<&str>)> {
    session
        .board()
        .columns()
        .iter()
        .map(|column| (column.id(), column.lead_ids()))
        .collect()
}

fn start(id: &str) -> DragEvent {
    DragEvent::Start {
        lead_id: id.into(),
    }
}

#[tokio::test]
async fn load_partitions_leads_by_stage() {
    let (_store, notifier, session) = loaded(vec![
        Lead::new("1", "João Silva", FunnelStage::Novo),
        Lead::new("2", "Maria Souza", FunnelStage::Fechado),
    ])
    .await;

    assert_eq!(
        columns(&session),
        vec![
            ("novo", vec!["1"]),
            ("qualificacao", vec![]),
            ("visita-agendada", vec![]),
            ("proposta", vec![]),
            ("negociacao", vec![]),
            ("fechado", vec!["2"]),
        ]
    );
    assert!(notifier.snapshot().is_empty());
}

#[tokio::test]
async fn cross_column_drop_commits_once() {
    let (store, notifier, mut session) =
        loaded(vec![Lead::new("1", "João Silva", FunnelStage::Novo)]).await;

    let report = session
        .drag(vec![
            start("1"),
            DragEvent::Over {
                target: DropTarget::Column("qualificacao".into()),
            },
            DragEvent::End {
                target: Some(DropTarget::Column("qualificacao".into())),
            },
        ])
        .await
        .unwrap();

    assert!(session.board().column(FunnelStage::Novo).is_empty());
    assert_eq!(
        session.board().column(FunnelStage::EmQualificacao).lead_ids(),
        vec!["1"]
    );
    assert_eq!(
        store.updates(),
        vec![("1".to_string(), FunnelStage::EmQualificacao)]
    );
    assert_eq!(store.snapshot()[0].funnel_stage, "Em Qualificação");
    assert_eq!(report.settlement, Some(Settlement::Confirmed));
    assert_eq!(
        session.board().get("1").unwrap().stage(),
        Some(FunnelStage::EmQualificacao)
    );

    let seen = notifier.snapshot();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, Level::Success);
}

#[tokio::test]
async fn failed_commit_keeps_optimistic_placement() {
    let (store, notifier, mut session) =
        loaded(vec![Lead::new("1", "João Silva", FunnelStage::Novo)]).await;
    store.fail_updates(true);

    let report = session
        .drag(vec![
            start("1"),
            DragEvent::Over {
                target: DropTarget::Column("qualificacao".into()),
            },
            DragEvent::End {
                target: Some(DropTarget::Column("qualificacao".into())),
            },
        ])
        .await
        .unwrap();

    assert_eq!(
        session.board().column(FunnelStage::EmQualificacao).lead_ids(),
        vec!["1"]
    );
    assert!(matches!(
        report.commit.map(|c| c.status),
        Some(CommitStatus::Failed { .. })
    ));
    assert_eq!(store.updates().len(), 1, "no automatic retry");

    let seen = notifier.snapshot();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, Level::Error);
}

#[tokio::test]
async fn reorder_within_column_is_local_only() {
    let (store, notifier, mut session) = loaded(vec![
        Lead::new("2", "Maria Souza", FunnelStage::Fechado),
        Lead::new("3", "Pedro Lima", FunnelStage::Fechado),
    ])
    .await;

    let report = session
        .drag(vec![
            start("2"),
            DragEvent::Over {
                target: DropTarget::Lead("3".into()),
            },
            DragEvent::End {
                target: Some(DropTarget::Lead("3".into())),
            },
        ])
        .await
        .unwrap();

    assert_eq!(
        session.board().column(FunnelStage::Fechado).lead_ids(),
        vec!["3", "2"]
    );
    assert!(matches!(
        report.state,
        DragState::Dropped(DragOutcome::Reordered { .. })
    ));
    assert_eq!(report.commit, None);
    assert!(store.updates().is_empty());
    assert!(notifier.snapshot().is_empty());
}

#[tokio::test]
async fn commit_can_run_after_further_interaction() {
    let (store, _notifier, mut session) = loaded(vec![
        Lead::new("1", "João Silva", FunnelStage::Novo),
        Lead::new("2", "Maria Souza", FunnelStage::Novo),
    ])
    .await;

    let mut first = None;
    for event in [
        start("1"),
        DragEvent::End {
            target: Some(DropTarget::Column("negociacao".into())),
        },
    ] {
        first = session.handle(event).unwrap().or(first);
    }
    let first = first.unwrap();

    // the user keeps dragging before the write resolves
    let reconciler = session.reconciler().clone();
    let pending = tokio::spawn(async move { reconciler.commit(first).await });
    for event in [
        start("2"),
        DragEvent::End {
            target: Some(DropTarget::Column("proposta".into())),
        },
    ] {
        session.handle(event).unwrap();
    }

    let report = pending.await.unwrap();
    assert_eq!(session.settle(&report), Settlement::Confirmed);
    assert_eq!(
        store.updates(),
        vec![("1".to_string(), FunnelStage::Negociacao)]
    );
    assert_eq!(
        session.board().locate("2"),
        Some((FunnelStage::PropostaApresentada, 0))
    );
}

#[tokio::test]
async fn reload_after_failure_restores_remote_truth() {
    let (store, _notifier, mut session) =
        loaded(vec![Lead::new("1", "João Silva", FunnelStage::Novo)]).await;
    store.fail_updates(true);
    session
        .drag(vec![
            start("1"),
            DragEvent::End {
                target: Some(DropTarget::Column("fechado".into())),
            },
        ])
        .await
        .unwrap();
    assert!(session.board().is_pending("1"));

    session.load().await.unwrap();

    assert_eq!(session.board().locate("1"), Some((FunnelStage::Novo, 0)));
    assert_eq!(session.board().pending().count(), 0);
}
