//! Configuration discovery and loading.
//!
//! Priority, lowest to highest:
//! 1. Built-in defaults
//! 2. `pitch.yml` in the project root (or the file given with `--config`)
//! 3. `PITCH_*` environment variables
//!
//! CLI flags are applied by the caller on top of the returned value.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PitchError, Result};

use super::env_layer::apply_env_overrides;
use super::schema::ProvisionConfig;

/// Config file name looked up in the project root.
pub const CONFIG_FILE: &str = "pitch.yml";

/// Load the configuration for `project_root` using the process environment.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<ProvisionConfig> {
    load_config_with_env(project_root, explicit, |key| std::env::var(key))
}

/// Load the configuration with a custom env var lookup (for testing).
pub fn load_config_with_env<F>(
    project_root: &Path,
    explicit: Option<&Path>,
    env_fn: F,
) -> Result<ProvisionConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let mut config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(PitchError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            parse_file(path)?
        }
        None => {
            let path = project_root.join(CONFIG_FILE);
            if path.exists() {
                parse_file(&path)?
            } else {
                tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, project_root.display());
                ProvisionConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config, env_fn);

    if config.app_name.trim().is_empty() {
        config.app_name = project_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "app".to_string());
    }

    resolve_paths(&mut config, project_root);
    validate(&config)?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<ProvisionConfig> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ProvisionConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|e| PitchError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn resolve_paths(config: &mut ProvisionConfig, root: &Path) {
    config.environment.path = resolve(root, &config.environment.path);
    config.environment.requirements = config
        .environment
        .requirements
        .as_deref()
        .map(|p| resolve(root, p));
    config.changelog = resolve(root, &config.changelog);
}

fn validate(config: &ProvisionConfig) -> Result<()> {
    if config.environment.path.as_os_str().is_empty() {
        return Err(PitchError::ConfigValidationError {
            message: "environment.path must not be empty".to_string(),
        });
    }
    if let Some(version) = &config.environment.python_version {
        let valid = version
            .trim()
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.');
        if !valid {
            return Err(PitchError::ConfigValidationError {
                message: format!("environment.python_version '{}' is not a version", version),
            });
        }
    }
    Ok(())
}
