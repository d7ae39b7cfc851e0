use clap::{Args, Subcommand};

/// Board views and gestures.
#[derive(Clone, Debug, Subcommand)]
pub enum BoardCommands {
    /// Fetch the user's leads and show them by column.
    Show,
    /// Drag a lead onto a column or another card and commit the result.
    Move(MoveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MoveArgs {
    /// Lead to drag.
    pub lead_id: String,
    /// Destination column id (see `funil stages`).
    #[arg(long)]
    pub to: String,
    /// Drop onto this card instead of the end of the column.
    #[arg(long, value_name = "LEAD_ID")]
    pub over: Option<String>,
}
