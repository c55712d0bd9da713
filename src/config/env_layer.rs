//! Environment variable overrides.
//!
//! `PITCH_*` variables sit between the config file and CLI flags in
//! priority.

use std::path::PathBuf;

use super::schema::ProvisionConfig;

/// Variables read by [`apply_env_overrides`].
pub const ENV_OVERRIDES: &[&str] = &[
    "PITCH_ENV_PATH",
    "PITCH_PYTHON_VERSION",
    "PITCH_REQUIREMENTS",
    "PITCH_CHANGELOG",
    "PITCH_START_COMMAND",
];

/// Apply `PITCH_*` overrides with a custom env var lookup (for testing).
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut ProvisionConfig, env_fn: F)
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let get = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());

    if let Some(path) = get("PITCH_ENV_PATH") {
        config.environment.path = PathBuf::from(path);
    }
    if let Some(version) = get("PITCH_PYTHON_VERSION") {
        config.environment.python_version = Some(version);
    }
    if let Some(requirements) = get("PITCH_REQUIREMENTS") {
        config.environment.requirements = Some(PathBuf::from(requirements));
    }
    if let Some(changelog) = get("PITCH_CHANGELOG") {
        config.changelog = PathBuf::from(changelog);
    }
    if let Some(command) = get("PITCH_START_COMMAND") {
        config.start_command = Some(command);
    }
}
