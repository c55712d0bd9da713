//! Ordered execution of a variant's steps.

use std::time::{Duration, Instant};

use crate::steps::{Criticality, Step, StepExecutor, StepOutcome};
use crate::ui::UserInterface;

use super::recovery::{prompt_recovery, RecoveryAction};

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningResult {
    /// Every step finished or was skipped; carries the variant label.
    Completed(String),
    /// A fatal failure, or the operator stopped after a recoverable one.
    Aborted(String, String),
    /// No variant accepts this host.
    NoVariantMatched,
}

impl ProvisioningResult {
    /// Process exit code for this result.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Completed(_) | Self::NoVariantMatched => 0,
            Self::Aborted(..) => 1,
        }
    }
}

/// Per-step bookkeeping for one run.
#[derive(Debug)]
pub struct WorkflowResult {
    pub result: ProvisioningResult,
    /// Steps that ran to completion.
    pub completed: Vec<String>,
    /// Steps skipped (already present, declined, nothing to do).
    pub skipped: Vec<String>,
    /// Recoverable failures the operator chose to continue past.
    pub recovered: Vec<String>,
    pub duration: Duration,
}

/// Runs steps strictly in declared order.
pub struct WorkflowRunner<'a> {
    executor: &'a StepExecutor<'a>,
}

impl<'a> WorkflowRunner<'a> {
    /// Create a runner over an executor.
    pub fn new(executor: &'a StepExecutor<'a>) -> Self {
        Self { executor }
    }

    /// Run `steps` for the variant `label`.
    pub fn run(&self, label: &str, steps: &[Step], ui: &mut dyn UserInterface) -> WorkflowResult {
        let start = Instant::now();
        let mut run = WorkflowResult {
            result: ProvisioningResult::Completed(label.to_string()),
            completed: Vec::new(),
            skipped: Vec::new(),
            recovered: Vec::new(),
            duration: Duration::ZERO,
        };
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            ui.show_step(index + 1, total, &step.name);

            let failure = match self.executor.execute(step, ui) {
                Ok(StepOutcome::Done) => {
                    run.completed.push(step.name.clone());
                    continue;
                }
                Ok(StepOutcome::Skipped(reason)) => {
                    ui.message(&format!("Skipped {}: {}", step.name, reason));
                    run.skipped.push(step.name.clone());
                    continue;
                }
                Err(failure) => failure,
            };

            let reason = match step.criticality_for(failure.kind) {
                Criticality::Fatal => {
                    tracing::info!("fatal failure in '{}': {}", step.name, failure);
                    ui.error(&format!("{} failed: {}", step.name, failure.reason));
                    format!("{}: {}", step.name, failure.reason)
                }
                Criticality::Recoverable => {
                    tracing::warn!("recoverable failure in '{}': {}", step.name, failure);
                    match prompt_recovery(ui, &step.name, &failure) {
                        RecoveryAction::Continue => {
                            run.recovered.push(step.name.clone());
                            continue;
                        }
                        RecoveryAction::Abort => {
                            format!("stopped after {}: {}", step.name, failure.reason)
                        }
                    }
                }
            };

            run.result = ProvisioningResult::Aborted(label.to_string(), reason);
            break;
        }

        run.duration = start.elapsed();
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::PackageManager;
    use crate::environment::{PackageManifest, VenvBackend};
    use crate::requirements::FakeProbe;
    use crate::shell::{HostCommand, RecordingRunner};
    use crate::steps::EnvironmentTarget;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn run_steps(
        steps: &[Step],
        runner: &RecordingRunner,
        probe: &FakeProbe,
        ui: &mut MockUI,
    ) -> WorkflowResult {
        run_steps_as(steps, runner, probe, ui, true)
    }

    fn run_steps_as(
        steps: &[Step],
        runner: &RecordingRunner,
        probe: &FakeProbe,
        ui: &mut MockUI,
        elevated: bool,
    ) -> WorkflowResult {
        let temp = TempDir::new().unwrap();
        let target = EnvironmentTarget {
            path: temp.path().join("venv"),
            manifest: PackageManifest::default(),
        };
        let backend = VenvBackend::new(runner, probe, "python3");
        let executor = StepExecutor::new(runner, probe, &backend, &target).elevated(elevated);
        WorkflowRunner::new(&executor).run("debian", steps, ui)
    }

    fn packages() -> Step {
        Step::install("System packages", PackageManager::Apt, &["git"])
    }

    #[test]
    fn all_steps_complete() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();

        let run = run_steps(&[packages(), Step::build_environment()], &runner, &probe, &mut ui);

        assert_eq!(run.result, ProvisioningResult::Completed("debian".into()));
        assert_eq!(run.completed, vec!["System packages", "Application environment"]);
        assert_eq!(ui.steps().len(), 2);
        assert_eq!(ui.steps()[1].0, 2);
    }

    #[test]
    fn fatal_failure_stops_later_steps() {
        let runner = RecordingRunner::new();
        runner.fail_when("apt-get install", 100);
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();

        let steps = [packages().fatal(), Step::inform("Done", "should not print")];
        let run = run_steps(&steps, &runner, &probe, &mut ui);

        assert!(matches!(run.result, ProvisioningResult::Aborted(ref l, _) if l == "debian"));
        assert_eq!(run.result.exit_code(), 1);
        assert!(!ui.has_message("should not print"));
        assert!(ui.confirms().is_empty());
    }

    #[test]
    fn recoverable_failure_continues_on_default() {
        let runner = RecordingRunner::new();
        runner.fail_when("apt-get install", 100);
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();

        let run = run_steps(&[packages(), Step::build_environment()], &runner, &probe, &mut ui);

        assert_eq!(run.result, ProvisioningResult::Completed("debian".into()));
        assert_eq!(run.recovered, vec!["System packages"]);
        assert!(runner.ran("-m venv"));
    }

    #[test]
    fn recoverable_failure_declined_aborts() {
        let runner = RecordingRunner::new();
        runner.fail_when("apt-get install", 100);
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();
        ui.queue_answers(&["n"]);

        let run = run_steps(&[packages(), Step::build_environment()], &runner, &probe, &mut ui);

        assert!(matches!(run.result, ProvisioningResult::Aborted(..)));
        assert!(!runner.ran("-m venv"));
    }

    #[test]
    fn privilege_denied_on_default_install_aborts() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();

        let steps = [packages(), Step::build_environment()];
        let run = run_steps_as(&steps, &runner, &probe, &mut ui, false);

        assert!(matches!(run.result, ProvisioningResult::Aborted(ref l, _) if l == "debian"));
        assert!(ui.confirms().is_empty());
        assert!(ui.has_error("sudo is not available"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn privilege_denied_on_explicitly_recoverable_step_prompts() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["apt-get", "python3"]);
        let mut ui = MockUI::new();

        let steps = [packages().recoverable(), Step::build_environment()];
        let run = run_steps_as(&steps, &runner, &probe, &mut ui, false);

        assert_eq!(run.result, ProvisioningResult::Completed("debian".into()));
        assert_eq!(ui.confirms().len(), 1);
        assert_eq!(run.recovered, vec!["System packages"]);
        assert!(runner.ran("-m venv"));
    }

    #[test]
    fn declined_confirmation_is_skipped_not_failed() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::with(&["python3"]);
        let mut ui = MockUI::new();
        ui.queue_answers(&["no"]);

        let steps = [
            Step::confirm(
                "EPEL",
                "Enable EPEL?",
                false,
                HostCommand::privileged("yum install -y epel-release"),
            ),
            Step::build_environment(),
        ];
        let run = run_steps(&steps, &runner, &probe, &mut ui);

        assert_eq!(run.result, ProvisioningResult::Completed("debian".into()));
        assert_eq!(run.skipped, vec!["EPEL"]);
        assert!(!runner.ran("epel"));
    }

    #[test]
    fn environment_failure_is_fatal() {
        let runner = RecordingRunner::new();
        let probe = FakeProbe::default();
        let mut ui = MockUI::new();

        let run = run_steps(&[Step::build_environment()], &runner, &probe, &mut ui);

        assert!(matches!(run.result, ProvisioningResult::Aborted(..)));
        assert!(ui.confirms().is_empty());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ProvisioningResult::Completed("x".into()).exit_code(), 0);
        assert_eq!(ProvisioningResult::NoVariantMatched.exit_code(), 0);
        assert_eq!(ProvisioningResult::Aborted("x".into(), "y".into()).exit_code(), 1);
    }
}
