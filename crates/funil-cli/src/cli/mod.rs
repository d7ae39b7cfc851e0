use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use funil_config::GeneralConfig;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `funil` binary.
#[derive(Debug, Parser)]
#[command(name = "funil", version, about = "funil - lead-funnel kanban board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show this user's board instead of supabase.user_id
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Read leads from a JSON file instead of Supabase
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,
}

impl Cli {
    /// Extract global flags, falling back to the configured default format.
    #[must_use]
    pub fn global_flags(&self, general: Option<&GeneralConfig>) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or_else(|| configured_format(general)),
            quiet: self.quiet,
            verbose: self.verbose,
            user: self.user.clone(),
            fixture: self.fixture.clone(),
        }
    }
}

fn configured_format(general: Option<&GeneralConfig>) -> OutputFormat {
    let Some(general) = general else {
        return OutputFormat::Json;
    };
    OutputFormat::from_str(&general.default_format, true).unwrap_or_else(|_| {
        tracing::warn!(
            value = %general.default_format,
            "unknown general.default_format, using json"
        );
        OutputFormat::Json
    })
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use funil_config::GeneralConfig;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::BoardCommands;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "funil", "--format", "table", "--user", "u-9", "--verbose", "stages",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert_eq!(cli.user.as_deref(), Some("u-9"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stages));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["funil", "board", "show", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Board {
                action: BoardCommands::Show
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["funil", "--format", "xml", "stages"]).is_err());
    }

    #[test]
    fn board_move_requires_destination() {
        assert!(Cli::try_parse_from(["funil", "board", "move", "1"]).is_err());

        let cli = Cli::try_parse_from([
            "funil", "board", "move", "1", "--to", "fechado", "--over", "3",
        ])
        .expect("cli should parse");
        let Commands::Board {
            action: BoardCommands::Move(args),
        } = cli.command
        else {
            panic!("expected board move");
        };
        assert_eq!(args.lead_id, "1");
        assert_eq!(args.to, "fechado");
        assert_eq!(args.over.as_deref(), Some("3"));
    }

    #[test]
    fn format_falls_back_to_config_then_json() {
        let cli = Cli::try_parse_from(["funil", "stages"]).expect("cli should parse");
        let table = GeneralConfig {
            default_format: "table".into(),
        };
        let bogus = GeneralConfig {
            default_format: "yaml".into(),
        };

        assert_eq!(cli.global_flags(Some(&table)).format, OutputFormat::Table);
        assert_eq!(cli.global_flags(Some(&bogus)).format, OutputFormat::Json);
        assert_eq!(cli.global_flags(None).format, OutputFormat::Json);
    }

    #[test]
    fn explicit_format_beats_config() {
        let cli = Cli::try_parse_from(["funil", "-f", "raw", "stages"]).expect("cli should parse");
        let table = GeneralConfig {
            default_format: "table".into(),
        };
        assert_eq!(cli.global_flags(Some(&table)).format, OutputFormat::Raw);
    }
}
