//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pitch - provision this machine for the application.
#[derive(Debug, Parser)]
#[command(name = "pitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default pitch.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Read release markers below this directory instead of /
    #[arg(long, global = true, hide = true, env = "PITCH_MARKER_ROOT")]
    pub marker_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision this host (default if no command specified)
    Run(RunArgs),

    /// Show the host signals and the variant that would run
    Detect(DetectArgs),

    /// List the provisioning variants in priority order
    Variants,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Variant hint, e.g. raspberry-pi
    #[arg(long, value_name = "TOKEN")]
    pub hint: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Print commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Python version for the environment (overrides config)
    #[arg(long, value_name = "VERSION")]
    pub python: Option<String>,

    /// Environment directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub env_path: Option<PathBuf>,

    /// Arguments appended to the printed start command
    #[arg(last = true, value_name = "ARGS")]
    pub forwarded: Vec<String>,
}

/// Arguments for the `detect` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DetectArgs {
    /// Variant hint, e.g. raspberry-pi
    #[arg(long, value_name = "TOKEN")]
    pub hint: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["pitch", "--debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.debug);
    }

    #[test]
    fn run_collects_forwarded_args() {
        let cli = Cli::try_parse_from([
            "pitch",
            "run",
            "--dry-run",
            "--",
            "--no-browser",
            "--port",
            "8080",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.forwarded, vec!["--no-browser", "--port", "8080"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pitch", "-q", "detect", "--json", "-p", "/srv/app"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.project, Some(PathBuf::from("/srv/app")));
        assert!(matches!(cli.command, Some(Commands::Detect(DetectArgs { json: true, .. }))));
    }

    #[test]
    fn variants_takes_no_args() {
        let cli = Cli::try_parse_from(["pitch", "variants"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Variants)));
    }
}
