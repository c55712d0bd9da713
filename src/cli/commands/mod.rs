//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod detect;
pub mod dispatcher;
pub mod run;
pub mod variants;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::detection::HostSignals;

/// Collect host signals, optionally reading markers below `marker_root`.
///
/// Under a marker root the kernel string is left empty.
pub(crate) fn host_signals(marker_root: Option<&Path>, hint: Option<String>) -> HostSignals {
    match marker_root {
        Some(root) => HostSignals::collect_under(root, std::env::consts::OS, "", hint),
        None => HostSignals::collect(hint),
    }
}
