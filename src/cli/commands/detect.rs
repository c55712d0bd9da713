//! The `pitch detect` command shows what a run would select.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::DetectArgs;
use crate::detection::HostSignals;
use crate::error::{PitchError, Result};
use crate::registry::{HostProfile, Registry};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::host_signals;

/// JSON shape of `pitch detect --json`.
#[derive(Debug, Serialize)]
struct DetectReport<'a> {
    signals: &'a HostSignals,
    variant: Option<&'a str>,
    profile: Option<HostProfile>,
}

/// The detect command implementation.
pub struct DetectCommand {
    args: DetectArgs,
    marker_root: Option<PathBuf>,
}

impl DetectCommand {
    /// Create a new detect command.
    pub fn new(args: DetectArgs, marker_root: Option<PathBuf>) -> Self {
        Self { args, marker_root }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DetectArgs {
        &self.args
    }
}

impl Command for DetectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let signals = host_signals(self.marker_root.as_deref(), self.args.hint.clone());
        let registry = Registry::builtin();
        let selected = registry.select(&signals);

        if self.args.json {
            let report = DetectReport {
                signals: &signals,
                variant: selected.map(|v| v.label),
                profile: selected.map(|v| v.profile),
            };
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| PitchError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&format!("Platform:     {}", signals.platform()));
        if let Some(name) = signals.pretty_name() {
            ui.message(&format!("Distribution: {}", name));
        }
        if !signals.kernel().is_empty() {
            ui.message(&format!("Kernel:       {}", signals.kernel()));
        }
        let markers: Vec<&str> = signals.markers().keys().map(String::as_str).collect();
        if markers.is_empty() {
            ui.message("Markers:      (none)");
        } else {
            ui.message(&format!("Markers:      {}", markers.join(", ")));
        }
        if let Some(hint) = signals.hint() {
            ui.message(&format!("Hint:         {}", hint));
        }
        match selected {
            Some(variant) => ui.success(&format!(
                "Variant:      {} ({})",
                variant.label, variant.description
            )),
            None => ui.message("Variant:      no matching variant"),
        }

        Ok(CommandResult::success())
    }
}
