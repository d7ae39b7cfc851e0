//! Supabase (PostgREST) connection settings for the hosted lead table.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_leads_table() -> String {
    "leads".to_string()
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://abcd1234.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Project `anon` or service API key, sent as the `apikey` header.
    #[serde(default)]
    pub api_key: String,

    /// User session JWT. When empty the API key doubles as bearer token.
    #[serde(default)]
    pub access_token: String,

    /// Owner whose leads are shown on the board (`leads.user_id`).
    #[serde(default)]
    pub user_id: String,

    /// Table holding lead rows.
    #[serde(default = "default_leads_table")]
    pub leads_table: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            access_token: String::new(),
            user_id: String::new(),
            leads_table: default_leads_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SupabaseConfig {
    /// Check if the minimum fields for fetching a user's leads are present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty() && !self.user_id.is_empty()
    }

    /// Base URL of the PostgREST API, without a trailing slash.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }

    /// Token for the `Authorization: Bearer` header.
    pub fn bearer_token(&self) -> &str {
        if self.access_token.is_empty() {
            &self.api_key
        } else {
            &self.access_token
        }
    }

    /// Fail with [`ConfigError`] unless the section is usable.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "supabase".to_string(),
            });
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "supabase.url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", self.url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "supabase.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(self)
    }
}
