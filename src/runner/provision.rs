//! Detect, dispatch, run, report.

use crate::config::ProvisionConfig;
use crate::detection::HostSignals;
use crate::environment::IsolatedEnvironment;
use crate::registry::{Registry, Variant};
use crate::report::{read_version, CompletionReport};
use crate::requirements::CapabilityProbe;
use crate::shell::CommandRunner;
use crate::steps::{EnvironmentTarget, StepExecutor};
use crate::ui::UserInterface;

use super::workflow::{ProvisioningResult, WorkflowRunner};

/// Host-facing seams a run executes through.
pub struct HostSeams<'a> {
    pub runner: &'a dyn CommandRunner,
    pub probe: &'a dyn CapabilityProbe,
    pub environment: &'a dyn IsolatedEnvironment,
    /// Whether the process already runs as root.
    pub elevated: bool,
}

/// Drives one provisioning run.
pub struct Provisioner<'a> {
    registry: &'a Registry,
    config: &'a ProvisionConfig,
    dependencies: Vec<String>,
    forwarded: Vec<String>,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner. `dependencies` go into the environment,
    /// `forwarded` into the start instructions.
    pub fn new(
        registry: &'a Registry,
        config: &'a ProvisionConfig,
        dependencies: Vec<String>,
        forwarded: Vec<String>,
    ) -> Self {
        Self {
            registry,
            config,
            dependencies,
            forwarded,
        }
    }

    /// Select a variant for `signals` and run it.
    pub fn run(
        &self,
        signals: &HostSignals,
        seams: &HostSeams<'_>,
        ui: &mut dyn UserInterface,
    ) -> ProvisioningResult {
        let Some(variant) = self.registry.select(signals) else {
            ui.message(&format!(
                "No provisioning variant matches this host (platform: {}). Nothing was changed.",
                signals.platform()
            ));
            return ProvisioningResult::NoVariantMatched;
        };

        ui.show_header(&format!(
            "Provisioning {} for {}",
            self.config.app_name, variant.description
        ));

        let steps = variant.steps(self.config);
        let target = EnvironmentTarget {
            path: self.config.environment.path.clone(),
            manifest: variant.manifest(self.config, self.dependencies.clone()),
        };
        let executor = StepExecutor::new(seams.runner, seams.probe, seams.environment, &target)
            .elevated(seams.elevated);

        let run = WorkflowRunner::new(&executor).run(variant.label, &steps, ui);
        tracing::info!(
            "variant '{}' finished in {:?}: {} done, {} skipped, {} recovered",
            variant.label,
            run.duration,
            run.completed.len(),
            run.skipped.len(),
            run.recovered.len()
        );

        match &run.result {
            ProvisioningResult::Completed(_) => self.report(variant, ui),
            ProvisioningResult::Aborted(_, reason) => {
                ui.error(&format!("Provisioning aborted: {}", reason));
            }
            ProvisioningResult::NoVariantMatched => {}
        }
        run.result
    }

    fn report(&self, variant: &Variant, ui: &mut dyn UserInterface) {
        let version = read_version(&self.config.changelog);
        let report = CompletionReport::new(self.config, variant.profile, &self.forwarded, version);
        let mut lines = report.render().into_iter();
        if let Some(headline) = lines.next() {
            ui.success(&headline);
        }
        for line in lines {
            ui.message(&line);
        }
    }
}
