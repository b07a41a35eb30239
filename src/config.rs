use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cleaner::{ToolCommand, DEFAULT_ARTIFACT_PATHS};
use crate::error::{ConfigError, Result};

/// File name looked up under the user's config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaner: CleanerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Command line of the primary clean tool, program first
    pub primary_command: Vec<String>,
    /// Command line used with `--fvm`, program first
    pub alternate_command: Vec<String>,
    /// Paths relative to a project measured for freed bytes
    pub artifact_paths: Vec<String>,
    /// Measure artifact sizes before and after each clean
    pub measure_freed: bool,
    /// Maximum scan depth (unset = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            primary_command: vec!["flutter".to_string(), "clean".to_string()],
            alternate_command: vec![
                "fvm".to_string(),
                "flutter".to_string(),
                "clean".to_string(),
            ],
            artifact_paths: DEFAULT_ARTIFACT_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            measure_freed: true,
            max_depth: None,
        }
    }
}

impl CleanerConfig {
    pub fn primary_tool(&self) -> Option<ToolCommand> {
        ToolCommand::from_argv(&self.primary_command)
    }

    pub fn alternate_tool(&self) -> Option<ToolCommand> {
        ToolCommand::from_argv(&self.alternate_command)
    }

    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        self.artifact_paths.iter().map(PathBuf::from).collect()
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the user config
    /// file is read if present, and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");

        Ok(config)
    }

    /// Default config location, e.g. `~/.config/flutter-sweeper/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("flutter-sweeper").join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let cleaner = &self.cleaner;

        if cleaner.primary_tool().is_none() {
            return Err(ConfigError::Invalid(
                "cleaner.primary_command must name a program".into(),
            ));
        }
        if cleaner.alternate_tool().is_none() {
            return Err(ConfigError::Invalid(
                "cleaner.alternate_command must name a program".into(),
            ));
        }

        for artifact in &cleaner.artifact_paths {
            let path = Path::new(artifact);
            let escapes = path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if artifact.is_empty() || escapes {
                return Err(ConfigError::Invalid(format!(
                    "artifact path '{}' must be relative to the project",
                    artifact
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.cleaner.measure_freed);
        assert!(config.cleaner.max_depth.is_none());
    }

    #[test]
    fn default_tools_are_flutter_and_fvm() {
        let config = CleanerConfig::default();

        let primary = config.primary_tool().unwrap();
        assert_eq!(primary.program, "flutter");
        assert_eq!(primary.args, vec!["clean".to_string()]);

        let alternate = config.alternate_tool().unwrap();
        assert_eq!(alternate.to_string(), "fvm flutter clean");
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[cleaner]"));
        assert!(toml_str.contains(".dart_tool"));
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut config = Config::default();
        config.cleaner.primary_command.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn escaping_artifact_path_is_rejected() {
        let mut config = Config::default();
        config.cleaner.artifact_paths = vec!["../outside".to_string()];
        assert!(config.validate().is_err());

        config.cleaner.artifact_paths = vec!["/abs/build".to_string()];
        assert!(config.validate().is_err());

        config.cleaner.artifact_paths = vec!["ios/Pods".to_string()];
        assert!(config.validate().is_ok());
    }
}
