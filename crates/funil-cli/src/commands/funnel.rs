use anyhow::Context;
use funil_board::summarize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FunnelCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `funil funnel`.
pub async fn handle(
    action: &FunnelCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FunnelCommands::Summary => {
            let progress = Progress::spinner("Fetching leads...");
            let leads = match ctx.store.fetch_leads(&ctx.user_id).await {
                Ok(leads) => leads,
                Err(error) => {
                    progress.finish_err("fetch failed");
                    return Err(error).context("failed to fetch leads");
                }
            };
            progress.finish_clear();

            output(&summarize(&leads, chrono::Utc::now()), flags.format)
        }
    }
}
