//! The `pitch variants` command lists the registry in priority order.

use crate::error::Result;
use crate::registry::{HostProfile, Registry};
use crate::ui::{should_use_colors, PitchTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The variants command implementation.
pub struct VariantsCommand {
    registry: Registry,
}

impl VariantsCommand {
    /// List the built-in registry.
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }

    /// List a custom registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }
}

impl Default for VariantsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for VariantsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let theme = if should_use_colors() {
            PitchTheme::new()
        } else {
            PitchTheme::plain()
        };
        let width = self
            .registry
            .variants()
            .iter()
            .map(|v| v.label.len())
            .max()
            .unwrap_or(0);

        for (index, variant) in self.registry.variants().iter().enumerate() {
            let profile = match variant.profile {
                HostProfile::Desktop => "",
                HostProfile::Headless => " (headless)",
            };
            ui.message(&format!(
                "{:>2}. {}  {}{}",
                index + 1,
                theme.highlight.apply_to(format!("{:<width$}", variant.label)),
                variant.description,
                theme.dim.apply_to(profile)
            ));
        }
        Ok(CommandResult::success())
    }
}
