//! Shell command execution and host process facts.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    capture_line, execute, shell_quote, CommandOptions, CommandResult, CommandRunner,
    DryRunRunner, HostCommand, SystemRunner,
};
pub use mock::RecordingRunner;
pub use platform::{is_ci, is_elevated};
