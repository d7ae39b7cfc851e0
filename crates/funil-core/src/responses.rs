//! CLI response types returned as JSON by `funil` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FunnelStage;

/// A lead as rendered on a board card.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub search_profile: String,
    /// The last remote write for this lead failed and the card shows an
    /// unconfirmed placement.
    pub pending: bool,
}

/// One board column.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ColumnView {
    pub id: String,
    pub title: String,
    pub count: usize,
    pub leads: Vec<CardView>,
}

/// Response from `funil board show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub total: usize,
    pub warnings: Vec<String>,
}

/// Response from `funil board move`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MoveResponse {
    pub lead_id: String,
    /// `moved`, `reordered`, `unchanged` or `cancelled`.
    pub outcome: String,
    pub from_column: Option<String>,
    pub to_column: Option<String>,
    pub index: Option<usize>,
    /// `committed`, `failed`, `skipped`, or `None` when nothing was sent.
    pub commit: Option<String>,
    pub notifications: Vec<String>,
    pub board: BoardView,
}

/// Lead count for one stage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StageCount {
    pub stage: FunnelStage,
    pub column_id: String,
    pub count: usize,
}

/// Response from `funil funnel summary`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FunnelSummary {
    pub total_leads: usize,
    pub new_leads_this_month: usize,
    pub won_leads: usize,
    /// `won_leads / total_leads * 100`, 0 when there are no leads.
    pub conversion_rate: f64,
    pub unknown_stage_leads: usize,
    pub stages: Vec<StageCount>,
}

/// One row of `funil stages`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StageMapping {
    pub position: usize,
    pub stage: FunnelStage,
    pub column_id: String,
}

impl StageMapping {
    /// The full fixed mapping table, in funnel order.
    #[must_use]
    pub fn table() -> Vec<Self> {
        FunnelStage::ALL
            .iter()
            .map(|stage| Self {
                position: stage.ordinal(),
                stage: *stage,
                column_id: stage.column_id().to_string(),
            })
            .collect()
    }
}
