use std::sync::Arc;

use anyhow::Context;
use funil_board::{BoardSession, RecordingNotifier, SessionOptions};
use funil_config::FunilConfig;
use funil_store::{LeadStore, MemoryLeadStore, SupabaseLeadStore};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: FunilConfig,
    pub store: Arc<dyn LeadStore>,
    pub user_id: String,
}

impl AppContext {
    /// Pick the lead store: the `--fixture` file when given, Supabase
    /// otherwise.
    pub fn init(config: FunilConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let user_id = flags
            .user
            .clone()
            .unwrap_or_else(|| config.supabase.user_id.clone());

        let store: Arc<dyn LeadStore> = if let Some(path) = &flags.fixture {
            tracing::debug!(path = %path.display(), "using fixture lead store");
            Arc::new(
                MemoryLeadStore::from_json_file(path)
                    .with_context(|| format!("failed to load fixture {}", path.display()))?,
            )
        } else {
            let mut supabase = config.supabase.clone();
            supabase.user_id.clone_from(&user_id);
            supabase.require().context(
                "Supabase is not configured. Set FUNIL_SUPABASE__URL, FUNIL_SUPABASE__API_KEY \
                 and FUNIL_SUPABASE__USER_ID, or pass --fixture <path>",
            )?;
            Arc::new(SupabaseLeadStore::new(&supabase).context("failed to build Supabase client")?)
        };

        Ok(Self {
            config,
            store,
            user_id,
        })
    }

    /// A board session for the current user, reporting through `notifier`.
    pub fn session(
        &self,
        notifier: Arc<RecordingNotifier>,
    ) -> BoardSession<dyn LeadStore, RecordingNotifier> {
        BoardSession::new(
            Arc::clone(&self.store),
            notifier,
            SessionOptions {
                user_id: self.user_id.clone(),
                policy: self.config.board.divergence_policy,
                warn_unknown_stages: self.config.board.warn_unknown_stages,
            },
        )
    }
}
