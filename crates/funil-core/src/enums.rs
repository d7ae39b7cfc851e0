//! Funnel stages and the static stage ↔ column table.
//!
//! Stage names are serialized exactly as the remote `leads.funnel_stage`
//! column stores them (Portuguese display names with accents). Board columns
//! use a separate ASCII identifier; the two are a fixed bijection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// FunnelStage
// ---------------------------------------------------------------------------

/// Step of the sales funnel a lead is currently in.
///
/// ```text
/// novo → qualificacao → visita-agendada → proposta → negociacao → fechado
/// ```
///
/// Leads may jump between any two stages on the board; the order only
/// drives column layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum FunnelStage {
    #[serde(rename = "Novo")]
    Novo,
    #[serde(rename = "Em Qualificação")]
    EmQualificacao,
    #[serde(rename = "Visita Agendada")]
    VisitaAgendada,
    #[serde(rename = "Proposta Apresentada")]
    PropostaApresentada,
    #[serde(rename = "Negociação")]
    Negociacao,
    #[serde(rename = "Fechado")]
    Fechado,
}

/// `(stage, stage name, column id)` rows. Single source for both lookups.
const STAGE_TABLE: [(FunnelStage, &str, &str); 6] = [
    (FunnelStage::Novo, "Novo", "novo"),
    (FunnelStage::EmQualificacao, "Em Qualificação", "qualificacao"),
    (FunnelStage::VisitaAgendada, "Visita Agendada", "visita-agendada"),
    (
        FunnelStage::PropostaApresentada,
        "Proposta Apresentada",
        "proposta",
    ),
    (FunnelStage::Negociacao, "Negociação", "negociacao"),
    (FunnelStage::Fechado, "Fechado", "fechado"),
];

impl FunnelStage {
    /// Every stage, in funnel (column) order.
    pub const ALL: [Self; 6] = [
        Self::Novo,
        Self::EmQualificacao,
        Self::VisitaAgendada,
        Self::PropostaApresentada,
        Self::Negociacao,
        Self::Fechado,
    ];

    /// Position of this stage in [`Self::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Novo => 0,
            Self::EmQualificacao => 1,
            Self::VisitaAgendada => 2,
            Self::PropostaApresentada => 3,
            Self::Negociacao => 4,
            Self::Fechado => 5,
        }
    }

    /// Stage name as persisted in `leads.funnel_stage`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        STAGE_TABLE[self.ordinal()].1
    }

    /// Identifier of the board column that holds leads in this stage.
    #[must_use]
    pub const fn column_id(self) -> &'static str {
        STAGE_TABLE[self.ordinal()].2
    }

    /// Reverse lookup from a board column identifier.
    #[must_use]
    pub fn from_column_id(column_id: &str) -> Option<Self> {
        STAGE_TABLE
            .iter()
            .find(|(_, _, id)| *id == column_id)
            .map(|(stage, _, _)| *stage)
    }

    /// Whether a lead in this stage counts as a closed deal.
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Fechado)
    }
}

impl FromStr for FunnelStage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGE_TABLE
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(stage, _, _)| *stage)
            .ok_or_else(|| CoreError::UnknownStage(s.to_string()))
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DivergencePolicy
// ---------------------------------------------------------------------------

/// What the board does with an optimistic placement the remote store never
/// confirmed (failed commit, or a gesture cancelled after crossing columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DivergencePolicy {
    /// Leave the lead where it was dropped and flag it as pending
    /// reconciliation until the next full load.
    #[default]
    KeepPending,
    /// Put the lead back where the gesture started.
    Rollback,
}

impl DivergencePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeepPending => "keep_pending",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for DivergencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
