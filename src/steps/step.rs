//! Declarative step model.

use std::collections::BTreeMap;

use crate::detection::PackageManager;
use crate::environment::PackageManifest;
use crate::shell::HostCommand;

use super::executor::FailureKind;

/// How a failure of this step affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Abort without running later steps.
    Fatal,
    /// Warn and let the operator decide whether to go on.
    Recoverable,
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Install system packages through the package manager.
    InstallPackages {
        manager: PackageManager,
        packages: Vec<String>,
        /// Install the manifest's system package set ahead of `packages`.
        from_manifest: bool,
        /// Skip the step when the probe finds this command.
        skip_if_present: Option<String>,
        /// Variables scoped to the package manager's child processes.
        env: BTreeMap<String, String>,
    },
    /// Run `command` only if the operator agrees.
    Confirm {
        question: String,
        default: bool,
        command: HostCommand,
    },
    /// Ensure the isolated environment and install application dependencies.
    BuildEnvironment,
    /// Fail early when `tool` is not on the host.
    RequireTool { tool: String, hint: String },
    /// Print guidance.
    Inform { message: String },
}

/// One unit of a variant's procedure.
///
/// Criticality is fixed when the procedure is declared, never inferred
/// from the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Name shown in progress output.
    pub name: String,
    /// The work to do.
    pub action: StepAction,
    criticality: Criticality,
    /// Set once `fatal()` or `recoverable()` is called.
    explicit: bool,
}

impl Step {
    fn with(name: impl Into<String>, action: StepAction, criticality: Criticality) -> Self {
        Self {
            name: name.into(),
            action,
            criticality,
            explicit: false,
        }
    }

    /// Install `packages` with `manager`. Recoverable unless marked fatal.
    pub fn install(name: impl Into<String>, manager: PackageManager, packages: &[&str]) -> Self {
        Self::with(
            name,
            StepAction::InstallPackages {
                manager,
                packages: packages.iter().map(|p| p.to_string()).collect(),
                from_manifest: false,
                skip_if_present: None,
                env: BTreeMap::new(),
            },
            Criticality::Recoverable,
        )
    }

    /// Install the run manifest's system packages with `manager`.
    /// Recoverable unless marked fatal.
    pub fn install_manifest(name: impl Into<String>, manager: PackageManager) -> Self {
        let mut step = Self::install(name, manager, &[]);
        if let StepAction::InstallPackages { from_manifest, .. } = &mut step.action {
            *from_manifest = true;
        }
        step
    }

    /// Ask `question`, running `command` on yes. Recoverable.
    pub fn confirm(
        name: impl Into<String>,
        question: impl Into<String>,
        default: bool,
        command: HostCommand,
    ) -> Self {
        Self::with(
            name,
            StepAction::Confirm {
                question: question.into(),
                default,
                command,
            },
            Criticality::Recoverable,
        )
    }

    /// Build the isolated environment. Always fatal.
    pub fn build_environment() -> Self {
        Self::with(
            "Application environment",
            StepAction::BuildEnvironment,
            Criticality::Fatal,
        )
    }

    /// Require `tool` to be present. Fatal unless marked recoverable.
    pub fn require_tool(tool: &str, hint: &str) -> Self {
        Self::with(
            format!("Check for {}", tool),
            StepAction::RequireTool {
                tool: tool.to_string(),
                hint: hint.to_string(),
            },
            Criticality::Fatal,
        )
    }

    /// Print `message`.
    pub fn inform(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(
            name,
            StepAction::Inform {
                message: message.into(),
            },
            Criticality::Recoverable,
        )
    }

    /// Mark the step fatal.
    pub fn fatal(mut self) -> Self {
        self.criticality = Criticality::Fatal;
        self.explicit = true;
        self
    }

    /// Mark the step recoverable.
    pub fn recoverable(mut self) -> Self {
        self.criticality = Criticality::Recoverable;
        self.explicit = true;
        self
    }

    /// Append packages to an install step. No effect on other kinds.
    pub fn with_packages<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let StepAction::InstallPackages { packages, .. } = &mut self.action {
            for package in extra {
                let package = package.into();
                if !packages.contains(&package) {
                    packages.push(package);
                }
            }
        }
        self
    }

    /// Skip an install step when `command` is already on the host.
    pub fn skip_if_present(mut self, command: &str) -> Self {
        if let StepAction::InstallPackages {
            skip_if_present, ..
        } = &mut self.action
        {
            *skip_if_present = Some(command.to_string());
        }
        self
    }

    /// Scope an environment variable to this step's child processes.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        match &mut self.action {
            StepAction::InstallPackages { env, .. } => {
                env.insert(key.to_string(), value.to_string());
            }
            StepAction::Confirm { command, .. } => {
                command.env.insert(key.to_string(), value.to_string());
            }
            _ => {}
        }
        self
    }

    /// This step with `manifest`'s system packages filled in.
    ///
    /// Steps that do not install from the manifest come back unchanged.
    pub fn resolve(&self, manifest: &PackageManifest) -> Step {
        let mut step = self.clone();
        if let StepAction::InstallPackages {
            packages,
            from_manifest,
            ..
        } = &mut step.action
        {
            if *from_manifest {
                let own = std::mem::take(packages);
                *packages = manifest.system_packages.clone();
                *from_manifest = false;
                step = step.with_packages(own);
            }
        }
        step
    }

    /// Effective criticality. Environment builds are always fatal.
    pub fn criticality(&self) -> Criticality {
        match self.action {
            StepAction::BuildEnvironment => Criticality::Fatal,
            _ => self.criticality,
        }
    }

    /// Criticality applied to a failure of `kind`.
    ///
    /// A privilege denial is fatal unless the step was explicitly marked
    /// recoverable.
    pub fn criticality_for(&self, kind: FailureKind) -> Criticality {
        match (kind, self.criticality()) {
            (FailureKind::PrivilegeDenied, Criticality::Recoverable) if !self.explicit => {
                Criticality::Fatal
            }
            (_, criticality) => criticality,
        }
    }

    /// Short kind label for listings.
    pub fn kind(&self) -> &'static str {
        match self.action {
            StepAction::InstallPackages { .. } => "packages",
            StepAction::Confirm { .. } => "confirm",
            StepAction::BuildEnvironment => "environment",
            StepAction::RequireTool { .. } => "require",
            StepAction::Inform { .. } => "info",
        }
    }

    /// Commands this step would run, before elevation is applied.
    pub fn commands(&self) -> Vec<HostCommand> {
        match &self.action {
            StepAction::InstallPackages {
                manager,
                packages,
                env,
                ..
            } => manager
                .install_commands(packages)
                .into_iter()
                .map(|mut command| {
                    command.env.extend(env.clone());
                    command
                })
                .collect(),
            StepAction::Confirm { command, .. } => vec![command.clone()],
            _ => Vec::new(),
        }
    }
}
