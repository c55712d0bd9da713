//! Host detection.
//!
//! [`HostSignals`] is gathered once at startup; the variant registry only
//! reads it. [`PackageManager`] models the system installers variants use.

pub mod package_manager;
pub mod signals;

pub use package_manager::PackageManager;
pub use signals::{HostSignals, MARKER_FILES};
