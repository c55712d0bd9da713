//! Provisioning orchestration.
//!
//! - [`Provisioner`] - selects a variant, runs it, prints the report
//! - [`WorkflowRunner`] - ordered step execution with failure handling
//! - [`recovery`] - the continue-or-stop prompt after a recoverable failure

pub mod provision;
pub mod recovery;
pub mod workflow;

pub use provision::{HostSeams, Provisioner};
pub use recovery::{prompt_recovery, RecoveryAction, CONTINUE_QUESTION};
pub use workflow::{ProvisioningResult, WorkflowResult, WorkflowRunner};
