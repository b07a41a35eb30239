//! Project scanner for discovering Flutter projects in a directory tree.

use crate::cleaner::notifier::Notifier;
use crate::cleaner::validator::ProjectValidator;
use crate::error::{Result, SweeperError};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options for scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Maximum directory depth to scan (None = unlimited).
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links. Discovery never does.
    pub follow_symlinks: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// A directory confirmed to hold a Flutter project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedProject {
    /// Project directory.
    pub path: PathBuf,
    /// Directory name, used in progress output.
    pub name: String,
}

impl ValidatedProject {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

/// Check that `root` exists and is a directory.
///
/// The two failures are reported as distinct error kinds.
pub fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(SweeperError::RootNotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SweeperError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => Err(SweeperError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Scanner for discovering projects in a directory tree.
pub struct ProjectScanner {
    validator: ProjectValidator,
    options: ScanOptions,
}

impl ProjectScanner {
    /// Create a new scanner with the given options.
    ///
    /// `follow_symlinks` is forced off: discovery never traverses links.
    pub fn new(mut options: ScanOptions) -> Self {
        if options.follow_symlinks {
            tracing::warn!("Ignoring follow_symlinks: project discovery never follows links");
            options.follow_symlinks = false;
        }
        Self {
            validator: ProjectValidator::new(),
            options,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Walk `root` and return every project found, in walk order.
    ///
    /// Symbolic links are never followed, the root included. Projects do not
    /// stop the descent, so a package nested in another is reported too.
    /// Unreadable subtrees are reported to `notifier` and skipped.
    pub fn discover(&self, root: &Path, notifier: &dyn Notifier) -> Result<Vec<ValidatedProject>> {
        validate_root(root)?;

        let mut walker = WalkDir::new(root)
            .follow_links(self.options.follow_symlinks)
            .follow_root_links(false)
            .sort_by_file_name();

        if let Some(depth) = self.options.max_depth {
            walker = walker.max_depth(depth);
        }

        Ok(self.collect_projects(walker, notifier))
    }

    /// Validate every directory yielded by a walk.
    ///
    /// Walk errors are logged, reported to `notifier` and skipped.
    fn collect_projects<I>(&self, entries: I, notifier: &dyn Notifier) -> Vec<ValidatedProject>
    where
        I: IntoIterator<Item = walkdir::Result<walkdir::DirEntry>>,
    {
        let mut projects = Vec::new();

        for result in entries {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(path = ?err.path(), "Skipping unreadable directory: {}", err);
                    notifier.scan_error(err.path(), &err.to_string());
                    continue;
                }
            };

            // Symlinks report their own type here and are never descended
            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if self.validator.is_valid_project(path) {
                tracing::debug!(path = %path.display(), "Found project");
                projects.push(ValidatedProject::new(path.to_path_buf()));
            }
        }

        projects
    }
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}
