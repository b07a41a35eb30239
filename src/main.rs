use anyhow::Result;
use clap::Parser;

use flutter_sweeper::cli::{Cli, Command};
use flutter_sweeper::commands;
use flutter_sweeper::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    tracing::debug!(?config, "Loaded configuration");

    // Dispatch to subcommand
    let code = match cli.command {
        Command::Clean(args) => {
            tracing::info!(?args, "Starting clean");
            commands::clean::run(args, &config, cli.quiet)?
        }
        Command::Scan(args) => {
            tracing::info!(?args, "Starting scan");
            commands::scan::run(args, &config)?
        }
        Command::Completions(args) => {
            commands::completions::run(args);
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flutter_sweeper={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
