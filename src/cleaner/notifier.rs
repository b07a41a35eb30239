//! Progress and result events emitted by the batch.

use std::path::Path;

use crate::cleaner::orchestrator::BatchSummary;
use crate::error::SweeperError;

/// Receiver of batch events.
///
/// Every method has a no-op default, so implementors only override what they
/// render. Calls are made synchronously from the orchestrator's thread, in
/// the order the batch progresses.
pub trait Notifier {
    /// The root path failed validation; nothing will be scanned.
    fn root_invalid(&self, _error: &SweeperError) {}

    fn scan_started(&self, _root: &Path) {}

    /// A subtree could not be enumerated. The scan continues.
    fn scan_error(&self, _path: Option<&Path>, _message: &str) {}

    fn scan_finished(&self, _count: usize) {}

    fn no_projects_found(&self) {}

    /// Called before cleaning the `index`th (1-based) of `total` projects.
    fn project_progress(&self, _index: usize, _total: usize, _name: &str) {}

    /// Dry-run stand-in for spawning `command_line` in the project.
    fn dry_run(&self, _name: &str, _command_line: &str) {}

    fn project_result(&self, _name: &str, _succeeded: bool, _error: Option<&str>) {}

    fn batch_complete(&self, _summary: &BatchSummary) {}
}

/// Notifier that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn root_invalid(&self, error: &SweeperError) {
        (**self).root_invalid(error)
    }

    fn scan_started(&self, root: &Path) {
        (**self).scan_started(root)
    }

    fn scan_error(&self, path: Option<&Path>, message: &str) {
        (**self).scan_error(path, message)
    }

    fn scan_finished(&self, count: usize) {
        (**self).scan_finished(count)
    }

    fn no_projects_found(&self) {
        (**self).no_projects_found()
    }

    fn project_progress(&self, index: usize, total: usize, name: &str) {
        (**self).project_progress(index, total, name)
    }

    fn dry_run(&self, name: &str, command_line: &str) {
        (**self).dry_run(name, command_line)
    }

    fn project_result(&self, name: &str, succeeded: bool, error: Option<&str>) {
        (**self).project_result(name, succeeded, error)
    }

    fn batch_complete(&self, summary: &BatchSummary) {
        (**self).batch_complete(summary)
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Event, RecordingNotifier};
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_noop_accepts_every_event() {
        let notifier = NoopNotifier;
        notifier.root_invalid(&SweeperError::RootNotFound(PathBuf::from("/x")));
        notifier.scan_started(Path::new("/"));
        notifier.scan_error(None, "denied");
        notifier.scan_finished(3);
        notifier.no_projects_found();
        notifier.project_progress(1, 3, "app");
        notifier.dry_run("app", "flutter clean");
        notifier.project_result("app", false, Some("boom"));
        notifier.batch_complete(&BatchSummary::default());
    }

    #[test]
    fn test_reference_forwards_events() {
        let recorder = RecordingNotifier::default();
        {
            let by_ref: &RecordingNotifier = &recorder;
            Notifier::scan_finished(&by_ref, 2);
            Notifier::project_progress(&by_ref, 1, 2, "app");
        }

        assert_eq!(
            recorder.events(),
            vec![
                Event::ScanFinished(2),
                Event::Progress(1, 2, "app".to_string())
            ]
        );
    }
}
