//! Provisioning steps and their execution.
//!
//! - [`Step`] - one unit of a variant's procedure, with its [`Criticality`]
//! - [`StepExecutor`] - runs a single step against the host seams
//! - [`StepFailure`] - why a step failed, as a value
//!
//! # Example
//!
//! ```
//! use pitch::detection::PackageManager;
//! use pitch::steps::{Criticality, Step};
//!
//! let step = Step::install("System packages", PackageManager::Apt, &["git"])
//!     .skip_if_present("git");
//! assert_eq!(step.criticality(), Criticality::Recoverable);
//!
//! let build = Step::build_environment().recoverable();
//! // Environment builds are never downgraded.
//! assert_eq!(build.criticality(), Criticality::Fatal);
//! ```

pub mod executor;
pub mod step;

pub use executor::{EnvironmentTarget, FailureKind, StepExecutor, StepFailure, StepOutcome};
pub use step::{Criticality, Step, StepAction};
