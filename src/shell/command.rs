//! Shell command execution.

use crate::error::{PitchError, Result};
use std::collections::{BTreeMap, HashMap};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Last few lines of stderr (or stdout when stderr is empty).
    pub fn tail(&self, lines: usize) -> String {
        let source = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        let all: Vec<&str> = source.lines().collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables for this one child (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Something that can run a command line and report how it went.
///
/// Provisioning code only talks to this trait so tests and `--dry-run`
/// can substitute their own runner.
pub trait CommandRunner {
    /// Run `command` through the host shell.
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult>;
}

/// Runs commands on the host through `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        execute(command, options)
    }
}

/// Logs every command and reports success without running anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        let env: Vec<String> = options
            .env
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        if env.is_empty() {
            println!("  [dry-run] {}", command);
        } else {
            println!("  [dry-run] {} {}", env.join(" "), command);
        }
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }
}

/// A command to run on the host, with its privilege and scoped environment.
///
/// `env` applies to this child process only; it is never written into the
/// environment of the `pitch` process itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    /// Command line as it would be typed into `sh`.
    pub line: String,
    /// Whether the command needs root.
    pub privileged: bool,
    /// Variables set for this command only.
    pub env: BTreeMap<String, String>,
}

impl HostCommand {
    /// An unprivileged command.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            privileged: false,
            env: BTreeMap::new(),
        }
    }

    /// A command that must run as root.
    pub fn privileged(line: impl Into<String>) -> Self {
        Self {
            privileged: true,
            ..Self::new(line)
        }
    }

    /// Add a scoped environment variable.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Whether running this command needs `sudo`.
    pub fn needs_sudo(&self, elevated: bool) -> bool {
        self.privileged && !elevated
    }

    /// Render the final command line.
    ///
    /// `sudo` resets the environment, so scoped variables are passed through
    /// `env K=V` when elevation is added here.
    pub fn render(&self, elevated: bool) -> String {
        if !self.needs_sudo(elevated) {
            return self.line.clone();
        }

        let mut parts = vec!["sudo".to_string()];
        if !self.env.is_empty() {
            parts.push("env".to_string());
            for (key, value) in &self.env {
                parts.push(format!("{}={}", key, shell_quote(value)));
            }
        }
        if is_compound(&self.line) {
            parts.push("sh -c".to_string());
            parts.push(shell_quote(&self.line));
        } else {
            parts.push(self.line.clone());
        }
        parts.join(" ")
    }

    /// Execution options carrying the scoped environment.
    pub fn options(&self, elevated: bool, capture: bool) -> CommandOptions {
        let env = if self.needs_sudo(elevated) {
            HashMap::new()
        } else {
            self.env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        };
        CommandOptions {
            cwd: None,
            env,
            capture_stdout: capture,
            capture_stderr: capture,
        }
    }
}

fn is_compound(line: &str) -> bool {
    ["&&", "||", ";", "|", ">", "<"]
        .iter()
        .any(|op| line.contains(op))
}

/// Quote a value for `sh` when it holds anything beyond plain word characters.
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Execute a shell command.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let (shell, flag) = shell_and_flag();
    let mut cmd = Command::new(shell);
    cmd.arg(flag);
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("executing: {}", command);
    let output = cmd.output().map_err(|_| PitchError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Run a command quietly and return its trimmed stdout on success.
pub fn capture_line(command: &str) -> Option<String> {
    let options = CommandOptions {
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };
    execute(command, &options)
        .ok()
        .filter(|r| r.success)
        .map(|r| r.stdout.trim().to_string())
}

fn shell_and_flag() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd.exe", "/C")
    } else {
        ("/bin/sh", "-c")
    }
}
