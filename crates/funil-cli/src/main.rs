use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("funil error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    // Commands that need neither config nor a store.
    match &cli.command {
        cli::Commands::Stages => {
            return commands::stages::handle(&cli.global_flags(None));
        }
        cli::Commands::Schema(args) => return commands::schema::handle(args),
        _ => {}
    }

    let config = bootstrap::load_config()?;
    let flags = cli.global_flags(Some(&config.general));
    ui::init(&flags);
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config, &flags)
        .context("failed to initialize funil application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FUNIL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
