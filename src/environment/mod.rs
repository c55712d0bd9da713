//! Isolated application environments.
//!
//! - [`builder`] - Idempotent `ensure(path, manifest)` over a backend
//! - [`manifest`] - Package manifests and requirements-file parsing
//! - [`venv`] - Python virtual environment backend

pub mod builder;
pub mod manifest;
pub mod venv;

pub use builder::{EnsureOutcome, EnvironmentBuilder, IsolatedEnvironment};
pub use manifest::{load_dependencies, parse_requirements, PackageManifest};
pub use venv::{activation_command, environment_pip, environment_python, VenvBackend};
