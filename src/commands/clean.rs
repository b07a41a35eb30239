//! Clean command implementation.

use crate::cleaner::{
    BatchOrchestrator, CleanOptions, CommandRunner, ProjectScanner, ScanOptions,
};
use crate::cli::CleanArgs;
use crate::commands::{EXIT_INVALID_ROOT, EXIT_PARTIAL_FAILURE};
use crate::config::Config;
use crate::reporter::ConsoleNotifier;
use anyhow::{anyhow, Result};

/// Run the clean command, returning the process exit status.
pub fn run(args: CleanArgs, config: &Config, quiet: bool) -> Result<i32> {
    // Resolve to absolute path
    let path = args
        .path
        .canonicalize()
        .unwrap_or_else(|_| args.path.clone());

    let cleaner = &config.cleaner;
    let primary = cleaner
        .primary_tool()
        .ok_or_else(|| anyhow!("no primary clean command configured"))?;
    let alternate = cleaner
        .alternate_tool()
        .ok_or_else(|| anyhow!("no alternate clean command configured"))?;

    let scan_options = ScanOptions::new().with_max_depth(args.max_depth.or(cleaner.max_depth));
    let clean_options = CleanOptions {
        use_alternate_runner: args.fvm,
        dry_run: args.dry_run,
        measure_freed: cleaner.measure_freed && !args.no_measure,
    };

    let runner = CommandRunner::new(clean_options)
        .with_tools(primary, alternate)
        .with_artifact_paths(cleaner.artifact_paths());

    tracing::debug!(tool = %runner.tool(), path = %path.display(), "Prepared clean batch");

    let orchestrator = BatchOrchestrator::new(
        ProjectScanner::new(scan_options),
        runner,
        ConsoleNotifier::new(quiet, args.dry_run),
    );

    match orchestrator.run(&path) {
        Ok(summary) if summary.all_succeeded() => Ok(0),
        Ok(_) => Ok(EXIT_PARTIAL_FAILURE),
        Err(err) if err.is_root_error() => Ok(EXIT_INVALID_ROOT),
        Err(err) => Err(err.into()),
    }
}
