use clap::Subcommand;

/// Funnel metrics.
#[derive(Clone, Debug, Subcommand)]
pub enum FunnelCommands {
    /// Lead counts per stage, new leads this month, and conversion rate.
    Summary,
}
