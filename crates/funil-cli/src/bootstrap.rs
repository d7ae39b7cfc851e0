use anyhow::Context;
use funil_config::FunilConfig;

/// Read `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<FunilConfig> {
    let config = FunilConfig::load_with_dotenv().context("failed to load funil configuration")?;
    tracing::debug!(
        supabase = config.supabase.is_configured(),
        policy = %config.board.divergence_policy,
        "configuration loaded"
    );
    Ok(config)
}
