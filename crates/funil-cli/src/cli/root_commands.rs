use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{BoardCommands, FunnelCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// The kanban board.
    Board {
        #[command(subcommand)]
        action: BoardCommands,
    },
    /// Funnel metrics.
    Funnel {
        #[command(subcommand)]
        action: FunnelCommands,
    },
    /// List the funnel stages and their column ids.
    Stages,
    /// Print the JSON Schema of a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Lead,
    Board,
    Move,
    Summary,
}
