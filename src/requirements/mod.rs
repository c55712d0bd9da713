//! Host capability checks.
//!
//! - [`probe`] - Capability probe answering whether a command is on PATH

pub mod probe;

pub use probe::{CapabilityProbe, FakeProbe, SystemProbe};
