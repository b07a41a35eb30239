//! Structural check deciding whether a directory is a Flutter project.

use std::fs;
use std::path::Path;

/// File whose presence marks a Dart/Flutter package.
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Source directory every Flutter package carries.
pub const SOURCE_DIR: &str = "lib";

/// Predicate over candidate directories.
///
/// A directory is a project when it directly contains a `pubspec.yaml` file
/// and a `lib/` directory. Only existence is checked; neither is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectValidator;

impl ProjectValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check whether `path` looks like a project.
    ///
    /// Symlinked candidates are rejected without looking at their target.
    /// Any I/O error (permission denied, path removed mid-scan) yields
    /// `false`.
    pub fn is_valid_project(&self, path: &Path) -> bool {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_dir() => {}
            _ => return false,
        }

        let has_manifest = fs::metadata(path.join(MANIFEST_FILE))
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !has_manifest {
            return false;
        }

        fs::metadata(path.join(SOURCE_DIR))
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
