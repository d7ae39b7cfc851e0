//! # funil-store
//!
//! The remote lead store seam for funil.
//!
//! The board only ever needs two operations from the hosted lead table:
//! - fetch every lead owned by a user
//! - set `funnel_stage` on one lead, addressed by id
//!
//! [`LeadStore`] captures exactly that. Two implementations are provided:
//! - [`SupabaseLeadStore`]: PostgREST over HTTP (the hosted backend)
//! - [`MemoryLeadStore`]: in-process rows, for tests and fixture files

mod error;
mod http;
mod memory;
mod supabase;

pub use error::StoreError;
pub use memory::MemoryLeadStore;
pub use supabase::SupabaseLeadStore;

use async_trait::async_trait;
use funil_core::entities::Lead;
use funil_core::enums::FunnelStage;

/// Read/write access to the authoritative lead table.
///
/// Implementations must report every outcome explicitly; callers treat any
/// `Err` as a reportable failure and never retry on their own.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// `select * from leads where user_id = :user_id`, in backend order.
    async fn fetch_leads(&self, user_id: &str) -> Result<Vec<Lead>, StoreError>;

    /// `update leads set funnel_stage = :stage where id = :lead_id`.
    ///
    /// Returns [`StoreError::NotFound`] when no row matched.
    async fn update_funnel_stage(&self, lead_id: &str, stage: FunnelStage)
    -> Result<(), StoreError>;
}
