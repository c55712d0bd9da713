//! Completion reporting.
//!
//! Runs only after every step of the selected variant finished without
//! aborting.

pub mod completion;
pub mod version;

pub use completion::CompletionReport;
pub use version::{extract_version, read_version};
