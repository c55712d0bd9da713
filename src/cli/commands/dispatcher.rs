//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::detect::DetectCommand;
use super::run::RunCommand;
use super::variants::VariantsCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result for a process exit code.
    pub fn from_exit_code(exit_code: u8) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(i32::from(exit_code))
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let marker_root = cli.marker_root.clone();
        match &cli.command {
            Some(Commands::Run(args)) => self.run(cli, args.clone(), ui),
            Some(Commands::Detect(args)) => {
                DetectCommand::new(args.clone(), marker_root).execute(ui)
            }
            Some(Commands::Variants) => VariantsCommand::new().execute(ui),
            None => self.run(cli, RunArgs::default(), ui),
        }
    }

    fn run(&self, cli: &Cli, args: RunArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        RunCommand::new(&self.project_root, args)
            .with_config_file(cli.config.clone())
            .with_marker_root(cli.marker_root.clone())
            .execute(ui)
    }
}
