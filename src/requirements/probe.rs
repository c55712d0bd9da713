//! Capability probe: is a command available on this host?
//!
//! Lookups walk `PATH` on every call. A step earlier in the same run may
//! have just installed the tool, so results are never cached.
//!
//! # Example
//!
//! ```no_run
//! use pitch::requirements::probe::{CapabilityProbe, SystemProbe};
//!
//! let probe = SystemProbe::new();
//! if !probe.exists("git") {
//!     println!("git will be installed");
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Answers whether an external command is available.
pub trait CapabilityProbe {
    /// True when `command` resolves to an executable.
    fn exists(&self, command: &str) -> bool;
}

/// Probe backed by the real `PATH`.
///
/// Homebrew prefixes are searched after `PATH` because a fresh Homebrew
/// install is not on `PATH` until the shell is reloaded.
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    extra_dirs: Vec<PathBuf>,
}

impl SystemProbe {
    /// Create a probe over `PATH` plus the well-known Homebrew prefixes.
    pub fn new() -> Self {
        Self {
            extra_dirs: homebrew_default_prefixes()
                .into_iter()
                .map(|prefix| prefix.join("bin"))
                .collect(),
        }
    }

    /// Create a probe with explicit extra search directories (for testing).
    pub fn with_extra_dirs(extra_dirs: Vec<PathBuf>) -> Self {
        Self { extra_dirs }
    }
}

impl CapabilityProbe for SystemProbe {
    fn exists(&self, command: &str) -> bool {
        // Absolute or relative paths are checked directly.
        if command.contains(std::path::MAIN_SEPARATOR) {
            let path = Path::new(command);
            return path.is_file() && is_executable(path);
        }

        let mut entries = parse_system_path();
        entries.extend(self.extra_dirs.iter().cloned());
        let found = resolve_tool_path(command, &entries).is_some();
        tracing::debug!("probe {}: {}", command, found);
        found
    }
}

/// Probe over a fixed set of command names (for testing).
///
/// # Example
///
/// ```
/// use pitch::requirements::probe::{CapabilityProbe, FakeProbe};
///
/// let probe = FakeProbe::with(&["sudo", "apt-get"]);
/// assert!(probe.exists("sudo"));
/// assert!(!probe.exists("brew"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    present: BTreeSet<String>,
}

impl FakeProbe {
    /// A probe that reports exactly these commands as present.
    pub fn with(commands: &[&str]) -> Self {
        Self {
            present: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CapabilityProbe for FakeProbe {
    fn exists(&self, command: &str) -> bool {
        self.present.contains(command)
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, which is sometimes a shell builtin with
/// inconsistent error handling.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{}.exe", tool));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

fn homebrew_default_prefixes() -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        vec![PathBuf::from("/opt/homebrew"), PathBuf::from("/usr/local")]
    } else if cfg!(target_os = "linux") {
        vec![PathBuf::from("/home/linuxbrew/.linuxbrew")]
    } else {
        Vec::new()
    }
}
