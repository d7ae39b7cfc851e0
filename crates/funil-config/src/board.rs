//! Funnel board behavior.

use funil_core::enums::DivergencePolicy;
use serde::{Deserialize, Serialize};

const fn default_warn_unknown_stages() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardConfig {
    /// What to do with a placement the remote store did not confirm.
    #[serde(default)]
    pub divergence_policy: DivergencePolicy,

    /// Surface leads with an unrecognised `funnel_stage` as warnings on load.
    #[serde(default = "default_warn_unknown_stages")]
    pub warn_unknown_stages: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            divergence_policy: DivergencePolicy::default(),
            warn_unknown_stages: default_warn_unknown_stages(),
        }
    }
}
