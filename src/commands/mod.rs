//! Subcommand implementations.

pub mod clean;
pub mod completions;
pub mod scan;

/// Exit status when the root path is missing or not a directory.
pub const EXIT_INVALID_ROOT: i32 = 2;

/// Exit status when at least one project failed to clean.
pub const EXIT_PARTIAL_FAILURE: i32 = 5;
