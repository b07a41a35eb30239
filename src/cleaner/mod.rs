//! Flutter project discovery and cleaning.
//!
//! This module provides:
//! - The structural check deciding what counts as a project
//! - Symlink-safe discovery of projects under a root
//! - Running `flutter clean` (or an alternate runner) per project
//! - Sequential batch orchestration reporting through a [`Notifier`]

mod executor;
mod notifier;
mod orchestrator;
mod project_scanner;
mod tool;
mod validator;

pub use executor::{
    CleanFailure, CleanOptions, CleanOutcome, CommandRunner, DEFAULT_ARTIFACT_PATHS,
};
pub use notifier::{NoopNotifier, Notifier};
pub use orchestrator::{BatchOrchestrator, BatchSummary};
pub use project_scanner::{validate_root, ProjectScanner, ScanOptions, ValidatedProject};
pub use tool::{find_executable, ToolCommand};
pub use validator::{ProjectValidator, MANIFEST_FILE, SOURCE_DIR};
