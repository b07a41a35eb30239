//! Flutter Sweeper - find Flutter projects and clean them in one go
//!
//! This crate provides functionality for:
//! - Discovering Flutter projects (`pubspec.yaml` + `lib/`) under a directory
//! - Running `flutter clean` or `fvm flutter clean` in each of them
//! - Reporting progress and a summary of what was cleaned

pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod reporter;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SweeperError};
