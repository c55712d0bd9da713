//! Operator decision after a recoverable step failure.

use crate::steps::StepFailure;
use crate::ui::UserInterface;

/// The question asked after a recoverable failure.
pub const CONTINUE_QUESTION: &str = "Continue anyway?";

/// What to do after a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Go on with the next step.
    Continue,
    /// Stop the run.
    Abort,
}

/// Show the failure and the choices, then ask whether to continue.
///
/// The default answer is to continue. An unreadable answer also takes the
/// default.
pub fn prompt_recovery(
    ui: &mut dyn UserInterface,
    step_name: &str,
    failure: &StepFailure,
) -> RecoveryAction {
    ui.warning(&format!("{} failed ({}): {}", step_name, failure.kind, failure.reason));
    ui.message("This step is optional. Continue with the remaining steps, or stop here.");

    let proceed = ui.confirm(CONTINUE_QUESTION, true).unwrap_or_else(|err| {
        tracing::warn!("could not read an answer ({}), continuing", err);
        true
    });

    if proceed {
        RecoveryAction::Continue
    } else {
        RecoveryAction::Abort
    }
}
