//! In-memory partition of leads into the six funnel columns.
//!
//! The board is view state: rebuilt from a full fetch, mutated optimistically
//! by drag gestures, never persisted. Every lead id appears in at most one
//! column at any time.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use funil_core::entities::Lead;
use funil_core::enums::FunnelStage;
use funil_core::responses::{BoardView, CardView, ColumnView};

use crate::drag::DropTarget;
use crate::error::BoardError;

/// One funnel column: a stage and the ordered leads in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    stage: FunnelStage,
    leads: Vec<Lead>,
}

impl Column {
    const fn new(stage: FunnelStage) -> Self {
        Self {
            stage,
            leads: Vec::new(),
        }
    }

    #[must_use]
    pub const fn stage(&self) -> FunnelStage {
        self.stage
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.stage.column_id()
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.stage.as_str()
    }

    #[must_use]
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    #[must_use]
    pub fn lead_ids(&self) -> Vec<&str> {
        self.leads.iter().map(|lead| lead.id.as_str()).collect()
    }

    #[must_use]
    pub fn position(&self, lead_id: &str) -> Option<usize> {
        self.leads.iter().position(|lead| lead.id == lead_id)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.leads.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

/// A lead taken off the board, with where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub lead: Lead,
    pub stage: FunnelStage,
    pub index: usize,
}

/// Data problems found while partitioning a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The row's `funnel_stage` matches no column; the lead is not shown.
    UnknownStage { lead_id: String, stage: String },
    /// The fetch returned the same id twice; only the first row is shown.
    DuplicateLead { lead_id: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStage { lead_id, stage } => {
                write!(f, "lead {lead_id} has unknown funnel stage {stage:?}")
            }
            Self::DuplicateLead { lead_id } => {
                write!(f, "lead {lead_id} was returned more than once")
            }
        }
    }
}

/// Result of [`Board::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub placed: usize,
    pub warnings: Vec<LoadWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
    pending: BTreeSet<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board with one empty column per funnel stage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: FunnelStage::ALL.into_iter().map(Column::new).collect(),
            pending: BTreeSet::new(),
        }
    }

    /// Rebuild every column from a full fetch, keeping fetch order.
    ///
    /// Clears pending marks: a fresh fetch is authoritative.
    pub fn load(&mut self, leads: impl IntoIterator<Item = Lead>) -> LoadReport {
        self.clear();

        let mut report = LoadReport::default();
        let mut seen = HashSet::new();
        for lead in leads {
            let Some(stage) = lead.stage() else {
                tracing::warn!(lead_id = %lead.id, stage = %lead.funnel_stage, "lead has unknown funnel stage");
                report.warnings.push(LoadWarning::UnknownStage {
                    lead_id: lead.id,
                    stage: lead.funnel_stage,
                });
                continue;
            };
            if !seen.insert(lead.id.clone()) {
                tracing::warn!(lead_id = %lead.id, "duplicate lead in fetch");
                report
                    .warnings
                    .push(LoadWarning::DuplicateLead { lead_id: lead.id });
                continue;
            }
            self.columns[stage.ordinal()].leads.push(lead);
            report.placed += 1;
        }

        tracing::debug!(
            placed = report.placed,
            warnings = report.warnings.len(),
            "board loaded"
        );
        report
    }

    /// Empty every column.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.leads.clear();
        }
        self.pending.clear();
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, stage: FunnelStage) -> &Column {
        &self.columns[stage.ordinal()]
    }

    /// Column holding the lead and its position there.
    #[must_use]
    pub fn locate(&self, lead_id: &str) -> Option<(FunnelStage, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position(lead_id)
                .map(|index| (column.stage, index))
        })
    }

    #[must_use]
    pub fn get(&self, lead_id: &str) -> Option<&Lead> {
        self.locate(lead_id)
            .map(|(stage, index)| &self.columns[stage.ordinal()].leads[index])
    }

    /// Column a drag target points at, plus the hovered lead's position when
    /// the target is a card.
    #[must_use]
    pub fn resolve_target(&self, target: &DropTarget) -> Option<(FunnelStage, Option<usize>)> {
        match target {
            DropTarget::Column(column_id) => {
                FunnelStage::from_column_id(column_id).map(|stage| (stage, None))
            }
            DropTarget::Lead(lead_id) => self
                .locate(lead_id)
                .map(|(stage, index)| (stage, Some(index))),
        }
    }

    /// Take a lead off the board. `None` if it is not there.
    pub fn remove(&mut self, lead_id: &str) -> Option<Removed> {
        let (stage, index) = self.locate(lead_id)?;
        let lead = self.columns[stage.ordinal()].leads.remove(index);
        Some(Removed { lead, stage, index })
    }

    /// Insert a lead into `stage` at `index`, clamped to the column length.
    /// Returns the position actually used.
    ///
    /// # Errors
    ///
    /// [`BoardError::DuplicateLead`] if the id is already on the board.
    pub fn insert(
        &mut self,
        lead: Lead,
        stage: FunnelStage,
        index: usize,
    ) -> Result<usize, BoardError> {
        if self.locate(&lead.id).is_some() {
            return Err(BoardError::DuplicateLead(lead.id));
        }
        let column = &mut self.columns[stage.ordinal()];
        let index = index.min(column.leads.len());
        column.leads.insert(index, lead);
        Ok(index)
    }

    /// Move a lead between columns, or reorder it within one.
    ///
    /// Within a column the lead is taken out first and `index` addresses the
    /// shortened column, so moving `[a, b]` `a` to 1 yields `[b, a]`.
    ///
    /// # Errors
    ///
    /// [`BoardError::LeadNotInColumn`] if `from` does not hold the lead.
    pub fn move_lead(
        &mut self,
        lead_id: &str,
        from: FunnelStage,
        to: FunnelStage,
        index: usize,
    ) -> Result<usize, BoardError> {
        let source = &mut self.columns[from.ordinal()];
        let position = source
            .position(lead_id)
            .ok_or_else(|| BoardError::LeadNotInColumn {
                lead_id: lead_id.to_string(),
                column: from.column_id().to_string(),
            })?;
        let lead = source.leads.remove(position);

        let target = &mut self.columns[to.ordinal()];
        let index = index.min(target.leads.len());
        target.leads.insert(index, lead);
        Ok(index)
    }

    /// Record that the remote store now holds `stage` for this lead.
    pub fn mark_committed(&mut self, lead_id: &str, stage: FunnelStage) {
        self.pending.remove(lead_id);
        if let Some((current, index)) = self.locate(lead_id) {
            self.columns[current.ordinal()].leads[index].funnel_stage = stage.as_str().to_string();
        }
    }

    pub fn mark_pending(&mut self, lead_id: &str) {
        self.pending.insert(lead_id.to_string());
    }

    pub fn clear_pending(&mut self, lead_id: &str) {
        self.pending.remove(lead_id);
    }

    #[must_use]
    pub fn is_pending(&self, lead_id: &str) -> bool {
        self.pending.contains(lead_id)
    }

    /// Leads whose placement the remote store has not confirmed.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Every lead id on the board, column by column.
    #[must_use]
    pub fn lead_ids(&self) -> Vec<&str> {
        self.columns
            .iter()
            .flat_map(|column| column.leads.iter().map(|lead| lead.id.as_str()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    /// Render for output.
    #[must_use]
    pub fn view(&self, warnings: &[LoadWarning]) -> BoardView {
        let columns = self
            .columns
            .iter()
            .map(|column| ColumnView {
                id: column.id().to_string(),
                title: column.title().to_string(),
                count: column.len(),
                leads: column
                    .leads
                    .iter()
                    .map(|lead| CardView {
                        id: lead.id.clone(),
                        name: lead.name.clone(),
                        phone: lead.phone.clone(),
                        search_profile: lead.search_profile.clone(),
                        pending: self.is_pending(&lead.id),
                    })
                    .collect(),
            })
            .collect();

        BoardView {
            columns,
            total: self.len(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lead(id: &str, stage: FunnelStage) -> Lead {
        Lead::new(id, format!("Lead {id}"), stage)
    }

    fn loaded(leads: Vec<Lead>) -> Board {
        let mut board = Board::new();
        board.load(leads);
        board
    }

    #[test]
    fn new_board_has_six_empty_columns_in_order() {
        let board = Board::new();
        let ids: Vec<&str> = board.columns().iter().map(Column::id).collect();
        assert_eq!(
            ids,
            vec![
                "novo",
                "qualificacao",
                "visita-agendada",
                "proposta",
                "negociacao",
                "fechado"
            ]
        );
        assert!(board.is_empty());
    }

    #[test]
    fn load_partitions_in_fetch_order() {
        let board = loaded(vec![
            lead("1", FunnelStage::Novo),
            lead("2", FunnelStage::Fechado),
            lead("3", FunnelStage::Novo),
        ]);
        assert_eq!(board.column(FunnelStage::Novo).lead_ids(), vec!["1", "3"]);
        assert_eq!(board.column(FunnelStage::Fechado).lead_ids(), vec!["2"]);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn load_reports_unknown_stage_and_omits_lead() {
        let mut odd = lead("9", FunnelStage::Novo);
        odd.funnel_stage = "Perdido".into();

        let mut board = Board::new();
        let report = board.load(vec![lead("1", FunnelStage::Novo), odd]);

        assert_eq!(report.placed, 1);
        assert_eq!(
            report.warnings,
            vec![LoadWarning::UnknownStage {
                lead_id: "9".into(),
                stage: "Perdido".into()
            }]
        );
        assert_eq!(board.locate("9"), None);
    }

    #[test]
    fn load_keeps_first_of_duplicate_ids() {
        let mut board = Board::new();
        let report = board.load(vec![
            lead("1", FunnelStage::Novo),
            lead("1", FunnelStage::Fechado),
        ]);
        assert_eq!(board.locate("1"), Some((FunnelStage::Novo, 0)));
        assert_eq!(
            report.warnings,
            vec![LoadWarning::DuplicateLead {
                lead_id: "1".into()
            }]
        );
    }

    #[test]
    fn load_replaces_previous_contents_and_pending() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        board.mark_pending("1");
        board.load(vec![lead("2", FunnelStage::Negociacao)]);

        assert_eq!(board.lead_ids(), vec!["2"]);
        assert_eq!(board.pending().count(), 0);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        assert_eq!(board.remove("404"), None);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn remove_returns_origin() {
        let mut board = loaded(vec![
            lead("1", FunnelStage::Novo),
            lead("2", FunnelStage::Novo),
        ]);
        let removed = board.remove("2").unwrap();
        assert_eq!(removed.stage, FunnelStage::Novo);
        assert_eq!(removed.index, 1);
        assert_eq!(removed.lead.id, "2");
    }

    #[test]
    fn insert_clamps_index() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        let at = board
            .insert(lead("2", FunnelStage::Novo), FunnelStage::Novo, 99)
            .unwrap();
        assert_eq!(at, 1);
        assert_eq!(board.column(FunnelStage::Novo).lead_ids(), vec!["1", "2"]);
    }

    #[test]
    fn insert_rejects_lead_already_on_board() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        let err = board
            .insert(lead("1", FunnelStage::Novo), FunnelStage::Fechado, 0)
            .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateLead(id) if id == "1"));
    }

    #[test]
    fn move_across_columns() {
        let mut board = loaded(vec![
            lead("1", FunnelStage::Novo),
            lead("2", FunnelStage::EmQualificacao),
        ]);
        let at = board
            .move_lead("1", FunnelStage::Novo, FunnelStage::EmQualificacao, 0)
            .unwrap();
        assert_eq!(at, 0);
        assert!(board.column(FunnelStage::Novo).is_empty());
        assert_eq!(
            board.column(FunnelStage::EmQualificacao).lead_ids(),
            vec!["1", "2"]
        );
    }

    #[test]
    fn move_within_column_uses_index_directly() {
        let mut board = loaded(vec![
            lead("a", FunnelStage::Fechado),
            lead("b", FunnelStage::Fechado),
            lead("c", FunnelStage::Fechado),
        ]);
        board
            .move_lead("a", FunnelStage::Fechado, FunnelStage::Fechado, 2)
            .unwrap();
        assert_eq!(
            board.column(FunnelStage::Fechado).lead_ids(),
            vec!["b", "c", "a"]
        );

        board
            .move_lead("a", FunnelStage::Fechado, FunnelStage::Fechado, 0)
            .unwrap();
        assert_eq!(
            board.column(FunnelStage::Fechado).lead_ids(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn move_from_wrong_column_fails_without_mutation() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        let before = board.clone();
        let err = board
            .move_lead("1", FunnelStage::Fechado, FunnelStage::Novo, 0)
            .unwrap_err();
        assert!(matches!(err, BoardError::LeadNotInColumn { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn resolve_target_by_column_or_card() {
        let board = loaded(vec![
            lead("1", FunnelStage::Negociacao),
            lead("2", FunnelStage::Negociacao),
        ]);
        assert_eq!(
            board.resolve_target(&DropTarget::Column("proposta".into())),
            Some((FunnelStage::PropostaApresentada, None))
        );
        assert_eq!(
            board.resolve_target(&DropTarget::Lead("2".into())),
            Some((FunnelStage::Negociacao, Some(1)))
        );
        assert_eq!(
            board.resolve_target(&DropTarget::Column("perdido".into())),
            None
        );
        assert_eq!(board.resolve_target(&DropTarget::Lead("404".into())), None);
    }

    #[test]
    fn mark_committed_updates_copy_and_clears_pending() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        board
            .move_lead("1", FunnelStage::Novo, FunnelStage::Fechado, 0)
            .unwrap();
        board.mark_pending("1");

        board.mark_committed("1", FunnelStage::Fechado);

        assert!(!board.is_pending("1"));
        assert_eq!(board.get("1").unwrap().stage(), Some(FunnelStage::Fechado));
    }

    #[test]
    fn view_flags_pending_cards() {
        let mut board = loaded(vec![lead("1", FunnelStage::Novo)]);
        board.mark_pending("1");
        let warnings = vec![LoadWarning::DuplicateLead {
            lead_id: "1".into(),
        }];

        let view = board.view(&warnings);
        assert_eq!(view.total, 1);
        assert_eq!(view.columns[0].title, "Novo");
        assert_eq!(view.columns[0].count, 1);
        assert!(view.columns[0].leads[0].pending);
        assert_eq!(view.warnings, vec!["lead 1 was returned more than once"]);
    }
}
