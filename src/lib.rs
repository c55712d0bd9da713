//! pitch - provision an unknown host for a Python application.
//!
//! pitch identifies the operating system and distribution, selects one
//! provisioning variant from an ordered registry, and runs its steps:
//! system packages, an isolated environment, and the application's
//! dependencies inside it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `pitch.yml` loading and `PITCH_*` overrides
//! - [`detection`] - Host signals and package managers
//! - [`environment`] - Idempotent isolated-environment builder
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Variant registry and the built-in variants
//! - [`report`] - Version extraction and completion instructions
//! - [`requirements`] - Capability probe
//! - [`runner`] - Detect, dispatch and ordered step execution
//! - [`shell`] - Shell command execution
//! - [`steps`] - Step model and single-step execution
//! - [`ui`] - Terminal output and the confirmation gate
//!
//! # Example
//!
//! ```
//! use pitch::detection::HostSignals;
//! use pitch::registry::Registry;
//!
//! let signals = HostSignals::from_parts(
//!     "linux",
//!     &[("/etc/debian_version", "12.5\n")],
//!     "Linux 6.1.21-v8+ #1642 SMP PREEMPT aarch64",
//!     None,
//! );
//! let registry = Registry::builtin();
//! let variant = registry.select(&signals).unwrap();
//! assert_eq!(variant.label, "raspberry-pi");
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod environment;
pub mod error;
pub mod registry;
pub mod report;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{PitchError, Result};
