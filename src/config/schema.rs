//! Configuration schema for `pitch.yml`.
//!
//! Every field is optional. A project with no `pitch.yml` provisions with
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default environment directory, relative to the project root.
pub const DEFAULT_ENV_PATH: &str = ".venv";

/// Default dependency manifest, relative to the project root.
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";

/// Default changelog used for version extraction.
pub const DEFAULT_CHANGELOG: &str = "debian/changelog";

/// Top-level provisioning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Application name shown in the completion banner.
    pub app_name: String,

    /// Isolated environment settings.
    pub environment: EnvironmentConfig,

    /// Additional application dependencies, installed after the manifest file's.
    pub dependencies: Vec<String>,

    /// System packages appended to every variant's package list.
    pub extra_packages: Vec<String>,

    /// Changelog the version string is read from.
    pub changelog: PathBuf,

    /// Command that starts the application (defaults to `app_name`).
    pub start_command: Option<String>,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            environment: EnvironmentConfig::default(),
            dependencies: Vec::new(),
            extra_packages: Vec::new(),
            changelog: PathBuf::from(DEFAULT_CHANGELOG),
            start_command: None,
        }
    }
}

impl ProvisionConfig {
    /// The command printed in the "how to start" instructions.
    pub fn start_command(&self) -> &str {
        self.start_command.as_deref().unwrap_or(&self.app_name)
    }
}

/// Isolated environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Directory of the virtual environment.
    pub path: PathBuf,

    /// Pinned interpreter version, e.g. `"3.11"`.
    pub python_version: Option<String>,

    /// Requirements-style manifest file.
    pub requirements: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENV_PATH),
            python_version: None,
            requirements: Some(PathBuf::from(DEFAULT_REQUIREMENTS)),
        }
    }
}

impl EnvironmentConfig {
    /// Interpreter executable the environment is created with.
    pub fn interpreter(&self) -> String {
        match self.python_version.as_deref().map(str::trim) {
            Some(version) if !version.is_empty() => format!("python{}", version),
            _ => "python3".to_string(),
        }
    }
}
