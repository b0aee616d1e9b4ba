//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use errorsmith::{ErrorsmithError, config::FactoryConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ErrorsmithError {
    fn from(err: ConfigError) -> Self {
        ErrorsmithError::Config(err.to_string())
    }
}

/// Application configuration read from `config.toml`.
///
/// ```toml
/// [factory]
/// backtrace = "disabled"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    factory: FactoryConfig,
}

impl AppConfig {
    /// Returns the configuration used for every generated type.
    pub fn factory(&self) -> &FactoryConfig {
        &self.factory
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Given with `--config`; it must exist.
    Explicit,
    /// `errorsmith/config.toml` under the working directory.
    Local,
    /// `config.toml` in the platform configuration directory.
    System,
}

/// Relative path of the project-local configuration file.
const LOCAL_CONFIG: &str = "errorsmith/config.toml";

/// Finds and loads the application configuration.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`errorsmith/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns [`ErrorsmithError::Config`] if an explicit path does not exist or
/// the selected file does not parse, and [`ErrorsmithError::Io`] if it
/// cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ErrorsmithError> {
    let explicit_path = explicit_path.map(|path| path.as_ref().to_path_buf());

    match locate_config(explicit_path) {
        Some((path, source)) => {
            info!(path = path.display().to_string(), source:? = source; "Loading configuration");
            read_config(&path, source)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Picks the configuration file to load, without reading it.
fn locate_config(explicit_path: Option<PathBuf>) -> Option<(PathBuf, ConfigSource)> {
    if let Some(path) = explicit_path {
        return Some((path, ConfigSource::Explicit));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some((local, ConfigSource::Local));
    }

    let Some(proj_dirs) = ProjectDirs::from("com", "errorsmith", "errorsmith") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };

    let system = proj_dirs.config_dir().join("config.toml");
    if system.exists() {
        Some((system, ConfigSource::System))
    } else {
        debug!(path = system.display().to_string(); "System configuration file not found");
        None
    }
}

fn read_config(path: &Path, source: ConfigSource) -> Result<AppConfig, ErrorsmithError> {
    // Only an explicit path can be missing here; discovered files were checked
    if source == ConfigSource::Explicit && !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config = toml::from_str(&content).map_err(|err: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use errorsmith::config::BacktracePolicy;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[factory]\nbacktrace = \"force\"\n").expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert_eq!(config.factory().backtrace(), BacktracePolicy::Force);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "").expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert_eq!(config.factory().backtrace(), BacktracePolicy::Capture);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, ErrorsmithError::Config(ref msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_explicit_path_takes_precedence() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        assert_eq!(
            locate_config(Some(path.clone())),
            Some((path, ConfigSource::Explicit))
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[renderer]\nwidth = 3\n").expect("Failed to write config");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ErrorsmithError::Config(ref msg) if msg.starts_with("Failed to parse configuration")
        ));
    }
}
