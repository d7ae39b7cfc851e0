//! Supabase (PostgREST) lead store client.

use std::time::Duration;

use async_trait::async_trait;
use funil_config::SupabaseConfig;
use funil_core::entities::Lead;
use funil_core::enums::FunnelStage;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::http::{check_response, decode_json};
use crate::{LeadStore, StoreError};

#[derive(serde::Serialize)]
struct StagePatch<'a> {
    funnel_stage: &'a str,
}

/// HTTP client for the hosted lead table.
pub struct SupabaseLeadStore {
    http: reqwest::Client,
    rest_url: String,
    table: String,
}

impl SupabaseLeadStore {
    /// Build a client from the `[supabase]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the credentials cannot be used as
    /// header values, or [`StoreError::Http`] if the client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&config.api_key, "api_key")?);
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", config.bearer_token()), "access_token")?,
        );

        let http = reqwest::Client::builder()
            .user_agent("funil/0.1")
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            rest_url: config.rest_url(),
            table: config.leads_table.clone(),
        })
    }

    fn fetch_url(&self, user_id: &str) -> String {
        format!(
            "{}/{}?select=*&user_id=eq.{}",
            self.rest_url,
            self.table,
            urlencoding::encode(user_id)
        )
    }

    fn update_url(&self, lead_id: &str) -> String {
        format!(
            "{}/{}?id=eq.{}",
            self.rest_url,
            self.table,
            urlencoding::encode(lead_id)
        )
    }
}

fn header_value(value: &str, field: &str) -> Result<HeaderValue, StoreError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| StoreError::Config(format!("supabase.{field}: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

#[async_trait]
impl LeadStore for SupabaseLeadStore {
    async fn fetch_leads(&self, user_id: &str) -> Result<Vec<Lead>, StoreError> {
        let url = self.fetch_url(user_id);
        tracing::debug!(%url, "fetching leads");

        let resp = check_response(self.http.get(&url).send().await?).await?;
        let leads: Vec<Lead> = decode_json(resp).await?;

        tracing::debug!(count = leads.len(), "fetched leads");
        Ok(leads)
    }

    async fn update_funnel_stage(
        &self,
        lead_id: &str,
        stage: FunnelStage,
    ) -> Result<(), StoreError> {
        let url = self.update_url(lead_id);
        tracing::debug!(%url, lead_id, %stage, "updating funnel stage");

        let resp = self
            .http
            .patch(&url)
            .header("Prefer", "return=representation")
            .json(&StagePatch {
                funnel_stage: stage.as_str(),
            })
            .send()
            .await?;
        let resp = check_response(resp).await?;

        // With `return=representation` PostgREST echoes the updated rows; an
        // empty array means the id filter matched nothing.
        let rows: Vec<serde_json::Value> = decode_json(resp).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(lead_id.to_string()));
        }
        Ok(())
    }
}
