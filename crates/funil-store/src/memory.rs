//! In-process lead store.
//!
//! Backs the CLI `--fixture` mode and the board tests. Keeps call counts so
//! tests can assert how many remote writes a gesture produced.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use funil_core::entities::Lead;
use funil_core::enums::FunnelStage;

use crate::{LeadStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    updates: Mutex<Vec<(String, FunnelStage)>>,
    fetch_calls: AtomicUsize,
    fail_fetches: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemoryLeadStore {
    #[must_use]
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
            ..Self::default()
        }
    }

    /// Load a JSON array of lead rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Parse`] if it is not an array of leads.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let leads: Vec<Lead> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Parse(format!("{}: {e}", path.display())))?;
        Ok(Self::new(leads))
    }

    /// Make every subsequent fetch fail with a 503.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent update fail with a 503.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of `fetch_leads` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Every `update_funnel_stage` call received, successful or not.
    pub fn updates(&self) -> Vec<(String, FunnelStage)> {
        lock(&self.updates).clone()
    }

    /// Current rows.
    pub fn snapshot(&self) -> Vec<Lead> {
        lock(&self.leads).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn unavailable() -> StoreError {
    StoreError::Api {
        status: 503,
        message: "store unavailable".to_string(),
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    /// Rows without a `user_id` belong to every user, so fixture files do not
    /// need one.
    async fn fetch_leads(&self, user_id: &str) -> Result<Vec<Lead>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(lock(&self.leads)
            .iter()
            .filter(|lead| lead.user_id.as_deref().is_none_or(|owner| owner == user_id))
            .cloned()
            .collect())
    }

    async fn update_funnel_stage(
        &self,
        lead_id: &str,
        stage: FunnelStage,
    ) -> Result<(), StoreError> {
        lock(&self.updates).push((lead_id.to_string(), stage));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut leads = lock(&self.leads);
        let lead = leads
            .iter_mut()
            .find(|lead| lead.id == lead_id)
            .ok_or_else(|| StoreError::NotFound(lead_id.to_string()))?;
        lead.funnel_stage = stage.as_str().to_string();
        Ok(())
    }
}
