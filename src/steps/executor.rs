//! Single-step execution.

use std::fmt;
use std::path::PathBuf;

use crate::environment::{EnvironmentBuilder, IsolatedEnvironment, PackageManifest};
use crate::error::PitchError;
use crate::requirements::CapabilityProbe;
use crate::shell::{is_elevated, CommandRunner, HostCommand};
use crate::ui::UserInterface;

use super::step::{Step, StepAction};

/// Category of a step failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A command exited non-zero or could not be spawned.
    CommandFailed,
    /// A required executable is not on the host.
    ToolMissing,
    /// Root is needed and cannot be obtained.
    PrivilegeDenied,
    /// The isolated environment could not be created or populated.
    EnvironmentBuild,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommandFailed => "command failed",
            Self::ToolMissing => "tool missing",
            Self::PrivilegeDenied => "privilege denied",
            Self::EnvironmentBuild => "environment build failed",
        };
        write!(f, "{}", label)
    }
}

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub kind: FailureKind,
    /// Human-readable reason shown to the operator.
    pub reason: String,
}

impl StepFailure {
    /// Create a failure.
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl From<PitchError> for StepFailure {
    fn from(err: PitchError) -> Self {
        let kind = match &err {
            PitchError::ToolMissing { .. } => FailureKind::ToolMissing,
            PitchError::PrivilegeDenied { .. } => FailureKind::PrivilegeDenied,
            PitchError::EnvironmentBuild { .. } => FailureKind::EnvironmentBuild,
            _ => FailureKind::CommandFailed,
        };
        Self::new(kind, err.to_string())
    }
}

/// Result of a step that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// Nothing was run, with the reason.
    Skipped(String),
}

/// Where the environment goes and what it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTarget {
    pub path: PathBuf,
    pub manifest: PackageManifest,
}

/// Executes steps against the host seams.
pub struct StepExecutor<'a> {
    runner: &'a dyn CommandRunner,
    probe: &'a dyn CapabilityProbe,
    environment: &'a dyn IsolatedEnvironment,
    target: &'a EnvironmentTarget,
    elevated: bool,
}

impl<'a> StepExecutor<'a> {
    /// Create an executor. Elevation is read from the current process.
    pub fn new(
        runner: &'a dyn CommandRunner,
        probe: &'a dyn CapabilityProbe,
        environment: &'a dyn IsolatedEnvironment,
        target: &'a EnvironmentTarget,
    ) -> Self {
        Self {
            runner,
            probe,
            environment,
            target,
            elevated: is_elevated(),
        }
    }

    /// Override whether the process counts as already running as root.
    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Execute one step. Steps are attempted once.
    pub fn execute(
        &self,
        step: &Step,
        ui: &mut dyn UserInterface,
    ) -> Result<StepOutcome, StepFailure> {
        tracing::info!("step '{}' ({})", step.name, step.kind());
        let resolved = step.resolve(&self.target.manifest);
        let step = &resolved;

        match &step.action {
            StepAction::InstallPackages {
                manager,
                packages,
                skip_if_present,
                ..
            } => {
                if let Some(tool) = skip_if_present {
                    if self.probe.exists(tool) {
                        tracing::debug!("{} found, skipping '{}'", tool, step.name);
                        return Ok(StepOutcome::Skipped(format!("{} already present", tool)));
                    }
                }
                if packages.is_empty() {
                    return Ok(StepOutcome::Skipped("nothing to install".to_string()));
                }
                if !self.probe.exists(manager.program()) {
                    return Err(StepFailure::new(
                        FailureKind::ToolMissing,
                        format!("package manager '{}' not found", manager.program()),
                    ));
                }
                let commands = step.commands();
                self.check_privilege(&commands)?;
                for command in &commands {
                    self.run_command(command, ui)?;
                }
                Ok(StepOutcome::Done)
            }
            StepAction::Confirm {
                question,
                default,
                command,
            } => {
                let agreed = ui.confirm(question, *default).unwrap_or_else(|err| {
                    tracing::warn!("could not read an answer ({}), using the default", err);
                    *default
                });
                if !agreed {
                    tracing::debug!("'{}' declined", step.name);
                    return Ok(StepOutcome::Skipped("declined".to_string()));
                }
                self.check_privilege(std::slice::from_ref(command))?;
                self.run_command(command, ui)?;
                Ok(StepOutcome::Done)
            }
            StepAction::BuildEnvironment => {
                let outcome = EnvironmentBuilder::new(self.environment)
                    .ensure(&self.target.path, &self.target.manifest)?;
                let verb = if outcome.created { "Created" } else { "Reused" };
                ui.message(&format!(
                    "{} environment at {} ({} dependencies)",
                    verb,
                    self.target.path.display(),
                    outcome.installed
                ));
                Ok(StepOutcome::Done)
            }
            StepAction::RequireTool { tool, hint } => {
                if self.probe.exists(tool) {
                    Ok(StepOutcome::Done)
                } else {
                    Err(PitchError::ToolMissing {
                        tool: tool.clone(),
                        hint: hint.clone(),
                    }
                    .into())
                }
            }
            StepAction::Inform { message } => {
                ui.message(message);
                Ok(StepOutcome::Done)
            }
        }
    }

    /// Refuse before running anything if a command needs `sudo` and there
    /// is none.
    fn check_privilege(&self, commands: &[HostCommand]) -> Result<(), StepFailure> {
        let blocked = commands
            .iter()
            .find(|c| c.needs_sudo(self.elevated) && !self.probe.exists("sudo"));
        match blocked {
            Some(command) => Err(PitchError::PrivilegeDenied {
                message: format!(
                    "'{}' must run as root and sudo is not available",
                    command.line
                ),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn run_command(
        &self,
        command: &HostCommand,
        ui: &mut dyn UserInterface,
    ) -> Result<(), StepFailure> {
        let line = command.render(self.elevated);
        let mode = ui.output_mode();
        // sudo may need the terminal for a password prompt.
        let capture = !mode.shows_command_output() && !command.needs_sudo(self.elevated);

        tracing::debug!("running: {}", line);
        let mut spinner = if capture && mode.shows_spinners() {
            Some(ui.start_spinner(&line))
        } else {
            if mode.shows_status() {
                ui.message(&format!("$ {}", line));
            }
            None
        };

        let result = match self.runner.run(&line, &command.options(self.elevated, capture)) {
            Ok(result) => result,
            Err(err) => {
                if let Some(s) = spinner.as_mut() {
                    s.finish_error(&line);
                }
                return Err(StepFailure::new(
                    FailureKind::CommandFailed,
                    format!("could not run '{}': {}", line, err),
                ));
            }
        };

        if result.success {
            if let Some(s) = spinner.as_mut() {
                s.finish_success(&line);
            }
            return Ok(());
        }

        if let Some(s) = spinner.as_mut() {
            s.finish_error(&line);
        }
        let code = result
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "a signal".to_string());
        let tail = result.tail(5);
        let reason = if tail.is_empty() {
            format!("'{}' exited with {}", line, code)
        } else {
            format!("'{}' exited with {}: {}", line, code, tail)
        };
        Err(StepFailure::new(FailureKind::CommandFailed, reason))
    }
}
