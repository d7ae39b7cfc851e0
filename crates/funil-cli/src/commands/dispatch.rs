use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Board { action } => commands::board::handle(&action, ctx, flags).await,
        Commands::Funnel { action } => commands::funnel::handle(&action, ctx, flags).await,
        Commands::Stages | Commands::Schema(_) => {
            unreachable!("stages/schema are pre-dispatched in main")
        }
    }
}
