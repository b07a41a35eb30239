//! Orchestrator driving discovery and sequential cleaning.

use crate::cleaner::executor::CommandRunner;
use crate::cleaner::notifier::Notifier;
use crate::cleaner::project_scanner::{validate_root, ProjectScanner};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Summary of cleaning results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Number of successfully cleaned projects.
    pub successful: usize,
    /// Number of failed cleanups.
    pub failed: usize,
    /// Total bytes freed.
    pub freed_bytes: u64,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Runs one batch: scan a root, then clean every project found, one at a
/// time, in discovery order.
pub struct BatchOrchestrator<N: Notifier> {
    scanner: ProjectScanner,
    runner: CommandRunner,
    notifier: N,
}

impl<N: Notifier> BatchOrchestrator<N> {
    /// Create a new orchestrator.
    pub fn new(scanner: ProjectScanner, runner: CommandRunner, notifier: N) -> Self {
        Self {
            scanner,
            runner,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Scan `root` and clean every project found.
    ///
    /// Only an invalid root fails the batch; it is reported to the notifier
    /// before anything is scanned. Per-project failures are counted in the
    /// summary and never stop the loop.
    pub fn run(&self, root: &Path) -> Result<BatchSummary> {
        if let Err(err) = validate_root(root) {
            tracing::debug!(error = %err, "Root validation failed");
            self.notifier.root_invalid(&err);
            return Err(err);
        }

        self.notifier.scan_started(root);
        let projects = match self.scanner.discover(root, &self.notifier) {
            Ok(projects) => projects,
            Err(err) => {
                // Root vanished between validation and the walk
                self.notifier.root_invalid(&err);
                return Err(err);
            }
        };
        self.notifier.scan_finished(projects.len());
        tracing::info!(count = projects.len(), root = %root.display(), "Scan finished");

        let mut summary = BatchSummary::default();

        if projects.is_empty() {
            self.notifier.no_projects_found();
            return Ok(summary);
        }

        let total = projects.len();
        for (i, project) in projects.iter().enumerate() {
            self.notifier.project_progress(i + 1, total, &project.name);

            let outcome = self.runner.clean(project, &self.notifier);
            let error = outcome.error_message();

            if outcome.succeeded() {
                summary.successful += 1;
                summary.freed_bytes += outcome.freed_bytes().unwrap_or(0);
            } else {
                summary.failed += 1;
            }

            self.notifier
                .project_result(&project.name, outcome.succeeded(), error.as_deref());
        }

        self.notifier.batch_complete(&summary);
        Ok(summary)
    }
}
