//! Variant registry.
//!
//! A [`Registry`] is an ordered table of [`Variant`]s. Order is priority:
//! the first variant whose predicate accepts the host signals is selected,
//! so specialised variants are listed ahead of their family.
//!
//! # Example
//!
//! ```
//! use pitch::detection::HostSignals;
//! use pitch::registry::Registry;
//!
//! let registry = Registry::builtin();
//! let signals = HostSignals::from_parts("linux", &[("/etc/debian_version", "12.5\n")], "", None);
//!
//! assert_eq!(registry.select(&signals).map(|v| v.label), Some("debian"));
//! ```

pub mod builtin;
pub mod resolver;
pub mod variant;

pub use builtin::builtin_variants;
pub use resolver::Registry;
pub use variant::{HostProfile, PackageSet, Predicate, Procedure, Variant};
