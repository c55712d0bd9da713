//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - `PITCH_*` environment overrides in [`env_layer`]
//!
//! # Example
//!
//! ```
//! use pitch::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("pitch.yml"), "app_name: test").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.app_name, "test");
//! assert!(config.environment.path.ends_with(".venv"));
//! ```

pub mod env_layer;
pub mod loader;
pub mod schema;

pub use env_layer::{apply_env_overrides, ENV_OVERRIDES};
pub use loader::{load_config, load_config_with_env, CONFIG_FILE};
pub use schema::{EnvironmentConfig, ProvisionConfig};
