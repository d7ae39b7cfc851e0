use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FunnelStage;

/// A prospective customer tracked through the sales funnel.
///
/// `funnel_stage` keeps the raw persisted value so that rows carrying a stage
/// outside [`FunnelStage::ALL`] still deserialize and can be reported instead
/// of failing the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Lead {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub funnel_stage: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub search_profile: String,
    #[serde(default)]
    pub financial_profile: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    /// Minimal lead with only the fields the board needs.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, stage: FunnelStage) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            funnel_stage: stage.as_str().to_string(),
            origin: String::new(),
            search_profile: String::new(),
            financial_profile: String::new(),
            notes: String::new(),
            created_at: None,
        }
    }

    /// Parsed funnel stage, `None` when the stored value is not a known stage.
    #[must_use]
    pub fn stage(&self) -> Option<FunnelStage> {
        self.funnel_stage.parse().ok()
    }
}
