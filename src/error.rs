//! Error types for pitch operations.
//!
//! This module defines [`PitchError`], the error type used outside the step
//! boundary, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PitchError` for failures that need distinct handling or messages
//! - Use `anyhow::Error` (via `PitchError::Other`) for unexpected errors
//! - Failures inside a provisioning step are converted to a
//!   [`StepFailure`](crate::steps::StepFailure) at the step boundary

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pitch operations.
#[derive(Debug, Error)]
pub enum PitchError {
    /// Configuration file explicitly requested but not present.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration parsed but holds invalid values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A command could not be spawned or exited non-zero.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// An external tool the operation relies on is not on PATH.
    #[error("Required tool '{tool}' not found: {hint}")]
    ToolMissing { tool: String, hint: String },

    /// Elevated privilege was needed and cannot be obtained.
    #[error("Privilege denied: {message}")]
    PrivilegeDenied { message: String },

    /// Isolated environment creation or dependency installation failed.
    #[error("Environment build failed at {path}: {message}")]
    EnvironmentBuild { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pitch operations.
pub type Result<T> = std::result::Result<T, PitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PitchError::ConfigNotFound {
            path: PathBuf::from("/foo/pitch.yml"),
        };
        assert!(err.to_string().contains("/foo/pitch.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PitchError::ConfigParseError {
            path: PathBuf::from("/srv/pitch.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/pitch.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PitchError::CommandFailed {
            command: "apt-get install -y git".into(),
            code: Some(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt-get install -y git"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn tool_missing_displays_tool_and_hint() {
        let err = PitchError::ToolMissing {
            tool: "brew".into(),
            hint: "install Homebrew from https://brew.sh".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("brew"));
        assert!(msg.contains("https://brew.sh"));
    }

    #[test]
    fn environment_build_displays_path() {
        let err = PitchError::EnvironmentBuild {
            path: PathBuf::from("/opt/app/.venv"),
            message: "python3.11 -m venv exited with 1".into(),
        };
        assert!(err.to_string().contains("/opt/app/.venv"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PitchError = io_err.into();
        assert!(matches!(err, PitchError::Io(_)));
    }
}
