//! System package managers.
//!
//! Only the command lines are modelled here. Argument semantics, retries and
//! the package database belong to the package manager itself.

use serde::Serialize;

use crate::shell::HostCommand;

/// A system package manager a variant installs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Apk,
    Homebrew,
    Pkg,
}

impl PackageManager {
    /// Executable that must be present for this manager to work.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Apk => "apk",
            Self::Homebrew => "brew",
            Self::Pkg => "pkg",
        }
    }

    /// Whether the manager must run as root.
    ///
    /// Homebrew refuses to run as root.
    pub fn needs_privilege(&self) -> bool {
        !matches!(self, Self::Homebrew)
    }

    /// Command that refreshes the package index, if the manager has one.
    fn refresh_line(&self) -> Option<&'static str> {
        match self {
            Self::Apt => Some("apt-get update"),
            Self::Pacman => Some("pacman -Sy"),
            Self::Zypper => Some("zypper --non-interactive refresh"),
            Self::Apk => Some("apk update"),
            Self::Homebrew => Some("brew update"),
            Self::Dnf | Self::Yum | Self::Pkg => None,
        }
    }

    fn install_prefix(&self) -> &'static str {
        match self {
            Self::Apt => "apt-get install -y",
            Self::Dnf => "dnf install -y",
            Self::Yum => "yum install -y",
            Self::Pacman => "pacman -S --needed --noconfirm",
            Self::Zypper => "zypper --non-interactive install",
            Self::Apk => "apk add",
            Self::Homebrew => "brew install",
            Self::Pkg => "pkg install -y",
        }
    }

    /// Commands to run, in order, to install `packages`.
    ///
    /// An empty package list yields no commands.
    pub fn install_commands(&self, packages: &[String]) -> Vec<HostCommand> {
        if packages.is_empty() {
            return Vec::new();
        }

        let make = |line: String| {
            if self.needs_privilege() {
                HostCommand::privileged(line)
            } else {
                HostCommand::new(line)
            }
        };

        let mut commands = Vec::new();
        if let Some(refresh) = self.refresh_line() {
            commands.push(make(refresh.to_string()));
        }
        commands.push(make(format!(
            "{} {}",
            self.install_prefix(),
            packages.join(" ")
        )));
        commands
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program())
    }
}
