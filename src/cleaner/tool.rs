//! External clean tool command lines and `PATH` resolution.

use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A program plus the arguments that make it clean a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from an argv-style list. Returns `None` when the program is
    /// missing or blank.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// `flutter clean`
    pub fn flutter() -> Self {
        Self::new("flutter", &["clean"])
    }

    /// `fvm flutter clean`
    pub fn fvm() -> Self {
        Self::new("fvm", &["flutter", "clean"])
    }

    /// Locate the program on `PATH`.
    pub fn resolve(&self) -> Option<PathBuf> {
        find_executable(&self.program, env::var_os("PATH").as_deref())
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Find `program` the way a shell would.
///
/// Names containing a path separator are checked directly; bare names are
/// searched in each entry of `search_path`.
pub fn find_executable(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    env::split_paths(search_path?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_display_command_line() {
        assert_eq!(ToolCommand::flutter().to_string(), "flutter clean");
        assert_eq!(ToolCommand::fvm().to_string(), "fvm flutter clean");
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["fvm".to_string(), "flutter".to_string(), "clean".to_string()];
        assert_eq!(ToolCommand::from_argv(&argv), Some(ToolCommand::fvm()));

        assert_eq!(ToolCommand::from_argv(&[]), None);
        assert_eq!(ToolCommand::from_argv(&["  ".to_string()]), None);
    }

    #[test]
    fn test_find_in_search_path() {
        let tmp = TempDir::new().unwrap();
        let script = write_script(tmp.path(), "fake-flutter", 0o755);
        let search = env::join_paths([PathBuf::from("/nonexistent"), tmp.path().to_path_buf()])
            .unwrap();

        let found = find_executable("fake-flutter", Some(search.as_os_str()));
        assert_eq!(found, Some(script));
    }

    #[test]
    fn test_non_executable_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_script(tmp.path(), "fake-flutter", 0o644);

        assert!(find_executable("fake-flutter", Some(tmp.path().as_os_str())).is_none());
    }

    #[test]
    fn test_directory_is_not_executable() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("flutter")).unwrap();

        assert!(find_executable("flutter", Some(tmp.path().as_os_str())).is_none());
    }

    #[test]
    fn test_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let script = write_script(tmp.path(), "tool", 0o755);
        let program = script.to_string_lossy().to_string();

        assert_eq!(find_executable(&program, None), Some(script.clone()));
        assert!(find_executable(&format!("{}-missing", program), None).is_none());
    }

    #[test]
    fn test_no_search_path() {
        assert!(find_executable("flutter", None).is_none());
    }

    #[test]
    fn test_missing_tool() {
        let tool = ToolCommand::new("definitely-not-a-real-tool-7f3a", &["clean"]);
        assert!(tool.resolve().is_none());
    }
}
