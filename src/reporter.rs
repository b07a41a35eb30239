//! Terminal rendering of batch events.

use crate::cleaner::{BatchSummary, Notifier};
use crate::error::SweeperError;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

/// Notifier printing progress to the terminal.
///
/// A spinner runs while scanning and a progress bar over the projects while
/// cleaning. Per-project lines go to stdout, failures to stderr.
pub struct ConsoleNotifier {
    quiet: bool,
    dry_run: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool, dry_run: bool) -> Self {
        Self {
            quiet,
            dry_run,
            bar: RefCell::new(None),
        }
    }

    fn new_bar(&self, bar: ProgressBar) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        bar
    }

    fn replace_bar(&self, bar: Option<ProgressBar>) {
        if let Some(old) = self.bar.replace(bar) {
            old.finish_and_clear();
        }
    }

    /// Print above the bar without tearing it.
    fn print(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }

    fn eprint(&self, line: String) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn root_invalid(&self, error: &SweeperError) {
        self.eprint(format!("Error: {}", error));
    }

    fn scan_started(&self, root: &Path) {
        if !self.quiet {
            println!("Scanning for Flutter projects in {}...", root.display());
        }
        let spinner = self.new_bar(ProgressBar::new_spinner());
        spinner.set_message("scanning");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.replace_bar(Some(spinner));
    }

    fn scan_error(&self, path: Option<&Path>, message: &str) {
        match path {
            Some(p) if !self.quiet => {
                self.eprint(format!("Warning: skipping {}: {}", p.display(), message))
            }
            None if !self.quiet => self.eprint(format!("Warning: {}", message)),
            _ => {}
        }
    }

    fn scan_finished(&self, count: usize) {
        self.replace_bar(None);
        if !self.quiet && count > 0 {
            println!("Found {} project{}", count, plural(count));
        }
        if count == 0 {
            return;
        }

        let bar = self.new_bar(ProgressBar::new(count as u64));
        let style = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        self.replace_bar(Some(bar));
    }

    fn no_projects_found(&self) {
        println!("No Flutter projects found.");
    }

    fn project_progress(&self, index: usize, _total: usize, name: &str) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.set_position(index.saturating_sub(1) as u64);
            bar.set_message(name.to_string());
        }
    }

    fn dry_run(&self, name: &str, command_line: &str) {
        self.print(format!("[DRY RUN] {}: would run `{}`", name, command_line));
    }

    fn project_result(&self, name: &str, succeeded: bool, error: Option<&str>) {
        if succeeded {
            if !self.quiet && !self.dry_run {
                self.print(format!("  Cleaned {}", name));
            }
        } else {
            self.eprint(format!(
                "  Error cleaning {}: {}",
                name,
                error.unwrap_or("unknown error")
            ));
        }
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.inc(1);
        }
    }

    fn batch_complete(&self, summary: &BatchSummary) {
        self.replace_bar(None);
        println!("\n{}", format_summary(summary, self.dry_run));
    }
}

impl Drop for ConsoleNotifier {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.get_mut().take() {
            bar.finish_and_clear();
        }
    }
}

/// One-line batch summary, distinguishing full success from partial failure.
pub fn format_summary(summary: &BatchSummary, dry_run: bool) -> String {
    let total = summary.total();

    if dry_run {
        return if summary.all_succeeded() {
            format!(
                "[DRY RUN] Would clean {} project{}",
                total,
                plural(total)
            )
        } else {
            format!(
                "[DRY RUN] Would clean {} of {} projects ({} failed)",
                summary.successful, total, summary.failed
            )
        };
    }

    let freed = format_size(summary.freed_bytes, BINARY);
    if summary.all_succeeded() {
        format!(
            "All {} project{} cleaned, freed {}",
            total,
            plural(total),
            freed
        )
    } else {
        format!(
            "Cleaned {} of {} projects ({} failed), freed {}",
            summary.successful, total, summary.failed, freed
        )
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn summary(successful: usize, failed: usize, freed_bytes: u64) -> BatchSummary {
        BatchSummary {
            successful,
            failed,
            freed_bytes,
        }
    }

    #[test]
    fn test_summary_all_succeeded() {
        assert_snapshot!(
            format_summary(&summary(3, 0, 512), false),
            @"All 3 projects cleaned, freed 512 B"
        );
    }

    #[test]
    fn test_summary_single_project() {
        assert_snapshot!(
            format_summary(&summary(1, 0, 0), false),
            @"All 1 project cleaned, freed 0 B"
        );
    }

    #[test]
    fn test_summary_partial_failure() {
        assert_snapshot!(
            format_summary(&summary(2, 1, 300), false),
            @"Cleaned 2 of 3 projects (1 failed), freed 300 B"
        );
    }

    #[test]
    fn test_summary_dry_run() {
        assert_snapshot!(
            format_summary(&summary(4, 0, 0), true),
            @"[DRY RUN] Would clean 4 projects"
        );
        assert_snapshot!(
            format_summary(&summary(3, 1, 0), true),
            @"[DRY RUN] Would clean 3 of 4 projects (1 failed)"
        );
    }

    #[test]
    fn test_summary_large_sizes_are_human_readable() {
        let text = format_summary(&summary(1, 0, 5 * 1024 * 1024), false);
        assert!(text.contains("MiB"));
    }

    #[test]
    fn test_quiet_notifier_handles_full_batch() {
        let notifier = ConsoleNotifier::new(true, false);
        notifier.scan_started(Path::new("/tmp"));
        notifier.scan_finished(2);
        notifier.project_progress(1, 2, "a");
        notifier.project_result("a", true, None);
        notifier.project_progress(2, 2, "b");
        notifier.project_result("b", false, Some("boom"));
        notifier.batch_complete(&summary(1, 1, 0));

        assert!(notifier.bar.borrow().is_none());
    }
}
