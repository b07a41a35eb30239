use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Flutter Sweeper - find Flutter projects and run flutter clean in each
#[derive(Parser, Debug)]
#[command(name = "flutter-sweeper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find Flutter projects and run flutter clean in each
    Clean(CleanArgs),

    /// List Flutter projects without cleaning them
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Use `fvm flutter clean` instead of `flutter clean`
    #[arg(long)]
    pub fvm: bool,

    /// Show what would be cleaned without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Maximum recursion depth
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Don't measure freed space
    #[arg(long)]
    pub no_measure: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Maximum recursion depth
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
