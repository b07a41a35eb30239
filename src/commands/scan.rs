//! Scan command implementation

use crate::cleaner::{NoopNotifier, ProjectScanner, ScanOptions};
use crate::cli::ScanArgs;
use crate::commands::EXIT_INVALID_ROOT;
use crate::config::Config;
use anyhow::Result;

/// List discovered projects, returning the process exit status.
pub fn run(args: ScanArgs, config: &Config) -> Result<i32> {
    let path = args
        .path
        .canonicalize()
        .unwrap_or_else(|_| args.path.clone());

    let options = ScanOptions::new().with_max_depth(args.max_depth.or(config.cleaner.max_depth));
    tracing::info!(path = %path.display(), "Scanning directory");

    // Unreadable subtrees are already logged by the scanner
    let projects = match ProjectScanner::new(options).discover(&path, &NoopNotifier) {
        Ok(projects) => projects,
        Err(err) if err.is_root_error() => {
            eprintln!("Error: {}", err);
            return Ok(EXIT_INVALID_ROOT);
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(0);
    }

    if projects.is_empty() {
        println!("No Flutter projects found.");
        return Ok(0);
    }

    for project in &projects {
        println!("  {}", project.path.display());
    }
    println!(
        "\nTotal: {} project{}",
        projects.len(),
        if projects.len() == 1 { "" } else { "s" }
    );

    Ok(0)
}
