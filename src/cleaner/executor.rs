//! Runs the external clean tool in one project directory.

use crate::cleaner::notifier::Notifier;
use crate::cleaner::project_scanner::ValidatedProject;
use crate::cleaner::tool::ToolCommand;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use thiserror::Error;
use walkdir::WalkDir;

/// Paths `flutter clean` removes, relative to the project root.
pub const DEFAULT_ARTIFACT_PATHS: &[&str] = &[
    "build",
    ".dart_tool",
    ".flutter-plugins",
    ".flutter-plugins-dependencies",
    "ios/Flutter/ephemeral",
    "linux/flutter/ephemeral",
    "macos/Flutter/ephemeral",
    "windows/flutter/ephemeral",
];

/// Why cleaning one project failed.
#[derive(Error, Debug)]
pub enum CleanFailure {
    #[error("Tool not found: '{program}' is not on PATH")]
    ToolNotFound { program: String },

    #[error("'{command}' failed ({status}): {message}")]
    NonZeroExit {
        command: String,
        status: String,
        message: String,
    },

    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Result of a clean operation.
#[derive(Debug)]
pub enum CleanOutcome {
    /// Cleaning succeeded. `freed_bytes` is unset when nothing was measured.
    Cleaned {
        project: PathBuf,
        freed_bytes: Option<u64>,
    },
    /// Cleaning failed.
    Failed {
        project: PathBuf,
        error: CleanFailure,
    },
}

impl CleanOutcome {
    pub fn project(&self) -> &Path {
        match self {
            CleanOutcome::Cleaned { project, .. } | CleanOutcome::Failed { project, .. } => {
                project
            }
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, CleanOutcome::Cleaned { .. })
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            CleanOutcome::Failed { error, .. } => Some(error.to_string()),
            CleanOutcome::Cleaned { .. } => None,
        }
    }

    pub fn freed_bytes(&self) -> Option<u64> {
        match self {
            CleanOutcome::Cleaned { freed_bytes, .. } => *freed_bytes,
            CleanOutcome::Failed { .. } => None,
        }
    }
}

/// Options for the command runner.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Run the alternate tool (e.g. `fvm flutter clean`).
    pub use_alternate_runner: bool,
    /// If true, report the command instead of running it.
    pub dry_run: bool,
    /// Measure artifact sizes around each real run.
    pub measure_freed: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            use_alternate_runner: false,
            dry_run: false,
            measure_freed: true,
        }
    }
}

/// Runs the configured clean tool in project directories.
pub struct CommandRunner {
    options: CleanOptions,
    primary: ToolCommand,
    alternate: ToolCommand,
    artifact_paths: Vec<PathBuf>,
}

impl CommandRunner {
    /// Runner using `flutter clean` / `fvm flutter clean` and the default
    /// artifact paths.
    pub fn new(options: CleanOptions) -> Self {
        Self {
            options,
            primary: ToolCommand::flutter(),
            alternate: ToolCommand::fvm(),
            artifact_paths: DEFAULT_ARTIFACT_PATHS.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn with_tools(mut self, primary: ToolCommand, alternate: ToolCommand) -> Self {
        self.primary = primary;
        self.alternate = alternate;
        self
    }

    pub fn with_artifact_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.artifact_paths = paths;
        self
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// The tool selected by the options.
    pub fn tool(&self) -> &ToolCommand {
        if self.options.use_alternate_runner {
            &self.alternate
        } else {
            &self.primary
        }
    }

    /// Clean a single project.
    ///
    /// Never panics or returns an error: every failure becomes a
    /// [`CleanOutcome::Failed`].
    pub fn clean(&self, project: &ValidatedProject, notifier: &dyn Notifier) -> CleanOutcome {
        let tool = self.tool();

        let Some(program) = tool.resolve() else {
            tracing::warn!(program = %tool.program, "Clean tool not found on PATH");
            return CleanOutcome::Failed {
                project: project.path.clone(),
                error: CleanFailure::ToolNotFound {
                    program: tool.program.clone(),
                },
            };
        };

        if self.options.dry_run {
            notifier.dry_run(&project.name, &tool.to_string());
            return CleanOutcome::Cleaned {
                project: project.path.clone(),
                freed_bytes: None,
            };
        }

        let before = self
            .options
            .measure_freed
            .then(|| self.artifact_size(&project.path));

        tracing::info!(
            project = %project.path.display(),
            command = %tool,
            "Running clean command"
        );

        let output = Command::new(&program)
            .args(&tool.args)
            .current_dir(&project.path)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let freed_bytes =
                    before.map(|b| b.saturating_sub(self.artifact_size(&project.path)));
                CleanOutcome::Cleaned {
                    project: project.path.clone(),
                    freed_bytes,
                }
            }
            Ok(output) => {
                let error = CleanFailure::NonZeroExit {
                    command: tool.to_string(),
                    status: output.status.to_string(),
                    message: failure_message(&output),
                };
                tracing::warn!(project = %project.path.display(), "{}", error);
                CleanOutcome::Failed {
                    project: project.path.clone(),
                    error,
                }
            }
            Err(source) => {
                let error = CleanFailure::Spawn {
                    command: tool.to_string(),
                    source,
                };
                tracing::warn!(project = %project.path.display(), "{}", error);
                CleanOutcome::Failed {
                    project: project.path.clone(),
                    error,
                }
            }
        }
    }

    /// Total size of the artifact paths under `project`. Best effort.
    fn artifact_size(&self, project: &Path) -> u64 {
        self.artifact_paths
            .iter()
            .map(|p| path_size(&project.join(p)))
            .sum()
    }
}

/// Captured stderr, or stdout when stderr is empty.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        return stdout.trim().to_string();
    }

    "no output".to_string()
}

/// Size of a file or directory tree, without following symlinks.
///
/// A symlinked `path` counts as zero, as do unreadable or missing entries.
fn path_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
