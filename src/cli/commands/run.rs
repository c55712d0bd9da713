//! Run command implementation.
//!
//! The `pitch run` command provisions the host.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{load_config, ProvisionConfig};
use crate::environment::{load_dependencies, VenvBackend};
use crate::error::Result;
use crate::registry::Registry;
use crate::requirements::SystemProbe;
use crate::runner::{HostSeams, Provisioner};
use crate::shell::{is_elevated, CommandRunner, DryRunRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::host_signals;

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
    config_file: Option<PathBuf>,
    marker_root: Option<PathBuf>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            config_file: None,
            marker_root: None,
        }
    }

    /// Use an explicit config file instead of `pitch.yml`.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Read release markers below `root` instead of `/`.
    pub fn with_marker_root(mut self, root: Option<PathBuf>) -> Self {
        self.marker_root = root;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Load the configuration and apply CLI overrides on top.
    fn load(&self) -> Result<ProvisionConfig> {
        let mut config = load_config(&self.project_root, self.config_file.as_deref())?;
        if let Some(version) = &self.args.python {
            config.environment.python_version = Some(version.clone());
        }
        if let Some(path) = &self.args.env_path {
            config.environment.path = if path.is_absolute() {
                path.clone()
            } else {
                self.project_root.join(path)
            };
        }
        Ok(config)
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.load()?;
        let dependencies = load_dependencies(&config)?;
        tracing::debug!(
            "{} application dependencies for {}",
            dependencies.len(),
            config.app_name
        );

        let signals = host_signals(self.marker_root.as_deref(), self.args.hint.clone());
        let registry = Registry::builtin();

        if self.args.dry_run {
            ui.message("Dry run: commands are printed, nothing is executed.");
        }

        let system = SystemRunner;
        let dry = DryRunRunner;
        let runner: &dyn CommandRunner = if self.args.dry_run { &dry } else { &system };
        let probe = SystemProbe::new();
        let backend = VenvBackend::new(runner, &probe, config.environment.interpreter())
            .with_live_output(ui.output_mode().shows_command_output());
        let seams = HostSeams {
            runner,
            probe: &probe,
            environment: &backend,
            elevated: is_elevated(),
        };

        let result = Provisioner::new(
            &registry,
            &config,
            dependencies,
            self.args.forwarded.clone(),
        )
        .run(&signals, &seams, ui);

        Ok(CommandResult::from_exit_code(result.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cli_overrides_apply_over_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pitch.yml"),
            "environment:\n  python_version: \"3.10\"\n",
        )
        .unwrap();
        let args = RunArgs {
            python: Some("3.12".to_string()),
            env_path: Some(PathBuf::from("env")),
            ..Default::default()
        };

        let config = RunCommand::new(temp.path(), args).load().unwrap();

        assert_eq!(config.environment.interpreter(), "python3.12");
        assert_eq!(config.environment.path, temp.path().join("env"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let err = RunCommand::new(temp.path(), RunArgs::default())
            .with_config_file(Some(temp.path().join("missing.yml")))
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, PitchError::ConfigNotFound { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unrecognized_host_exits_zero() {
        let project = TempDir::new().unwrap();
        let markers = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = RunArgs {
            dry_run: true,
            ..Default::default()
        };

        let result = RunCommand::new(project.path(), args)
            .with_marker_root(Some(markers.path().to_path_buf()))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("No provisioning variant"));
        assert!(!project.path().join(".venv").exists());
    }
}
