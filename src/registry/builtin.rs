//! Built-in variants.
//!
//! Package lists are static per distribution family. `extra_packages` from
//! the configuration is appended to every variant's system package set.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ProvisionConfig;
use crate::detection::{HostSignals, PackageManager};
use crate::shell::HostCommand;
use crate::steps::Step;

use super::variant::{HostProfile, Variant};

const RPI_HINTS: &[&str] = &["raspberry-pi", "rpi", "pi"];

/// Pi kernel flavours: a `-v6`/`-v7`/`-v7l`/`-v8` suffix, or an
/// `rpi`/`raspi`/`rpt` token inside the release.
static RPI_KERNEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:-v(?:6|7l?|8)\+?$|[-+](?:rpi|raspi|rpt)\d*(?:[-+]|$))")
        .expect("RPI_KERNEL must compile")
});

/// The built-in table, in priority order.
pub fn builtin_variants() -> Vec<Variant> {
    vec![
        Variant {
            label: "raspberry-pi",
            description: "Raspberry Pi OS and other Debian builds on a Pi",
            profile: HostProfile::Headless,
            matches: is_raspberry_pi,
            packages: raspberry_pi_packages,
            procedure: raspberry_pi,
        },
        Variant {
            label: "debian",
            description: "Debian, Ubuntu and derivatives (apt)",
            profile: HostProfile::Desktop,
            matches: is_debian,
            packages: debian_packages,
            procedure: debian,
        },
        Variant {
            label: "fedora",
            description: "Fedora (dnf)",
            profile: HostProfile::Desktop,
            matches: |s| s.has_marker("/etc/fedora-release"),
            packages: fedora_packages,
            procedure: fedora,
        },
        Variant {
            label: "rhel",
            description: "RHEL, CentOS, Rocky and Alma Linux (yum)",
            profile: HostProfile::Desktop,
            matches: |s| s.has_marker("/etc/redhat-release"),
            packages: rhel_packages,
            procedure: rhel,
        },
        Variant {
            label: "arch",
            description: "Arch Linux and derivatives (pacman)",
            profile: HostProfile::Desktop,
            matches: |s| s.has_marker("/etc/arch-release"),
            packages: arch_packages,
            procedure: arch,
        },
        Variant {
            label: "opensuse",
            description: "openSUSE Leap and Tumbleweed (zypper)",
            profile: HostProfile::Desktop,
            matches: |s| s.release_mentions("opensuse") || s.release_mentions("suse"),
            packages: opensuse_packages,
            procedure: opensuse,
        },
        Variant {
            label: "alpine",
            description: "Alpine Linux (apk)",
            profile: HostProfile::Desktop,
            matches: |s| s.has_marker("/etc/alpine-release"),
            packages: alpine_packages,
            procedure: alpine,
        },
        Variant {
            label: "macos",
            description: "macOS with Homebrew",
            profile: HostProfile::Desktop,
            matches: |s| s.platform() == "macos",
            packages: macos_packages,
            procedure: macos,
        },
        Variant {
            label: "freebsd",
            description: "FreeBSD (pkg)",
            profile: HostProfile::Desktop,
            matches: |s| s.platform() == "freebsd",
            packages: freebsd_packages,
            procedure: freebsd,
        },
    ]
}

fn is_debian(signals: &HostSignals) -> bool {
    signals.has_marker("/etc/debian_version")
}

fn is_raspberry_pi(signals: &HostSignals) -> bool {
    is_debian(signals)
        && (RPI_HINTS.iter().any(|h| signals.hint_is(h))
            || signals
                .kernel_release()
                .is_some_and(|release| RPI_KERNEL.is_match(release))
            || signals.release_mentions("raspbian"))
}

/// Interpreter packages for apt, honouring a pinned version.
fn apt_python(config: &ProvisionConfig) -> Vec<String> {
    match config.environment.python_version.as_deref() {
        Some(v) => vec![
            format!("python{}", v),
            format!("python{}-venv", v),
            format!("python{}-dev", v),
        ],
        None => vec![
            "python3".to_string(),
            "python3-venv".to_string(),
            "python3-dev".to_string(),
        ],
    }
}

/// Interpreter packages for the RPM-based managers.
fn rpm_python(config: &ProvisionConfig) -> Vec<String> {
    match config.environment.python_version.as_deref() {
        Some(v) => vec![format!("python{}", v), format!("python{}-devel", v)],
        None => vec!["python3".to_string(), "python3-devel".to_string()],
    }
}

fn with_python(mut python: Vec<String>, packages: &[&str]) -> Vec<String> {
    python.extend(packages.iter().map(|p| p.to_string()));
    python
}

fn raspberry_pi_packages(config: &ProvisionConfig) -> Vec<String> {
    let mut packages = debian_packages(config);
    packages.extend(["libopenjp2-7", "libatlas-base-dev"].map(String::from));
    packages
}

fn raspberry_pi(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::inform(
            "Raspberry Pi",
            "Raspberry Pi detected. Package builds on a Pi are slow; expect this to take a while.",
        ),
        Step::confirm(
            "System upgrade",
            "Upgrade installed system packages first?",
            false,
            HostCommand::privileged("apt-get update && apt-get -y full-upgrade"),
        )
        .with_env("DEBIAN_FRONTEND", "noninteractive"),
        Step::install_manifest("System packages", PackageManager::Apt)
            .with_env("DEBIAN_FRONTEND", "noninteractive"),
        Step::confirm(
            "Python build tooling",
            "Rebuild the system pip, setuptools and wheel for this board?",
            false,
            HostCommand::privileged(
                "python3 -m pip install --upgrade --break-system-packages pip setuptools wheel",
            ),
        )
        .with_env("CFLAGS", "-fcommon")
        .with_env("LDFLAGS", "-latomic"),
        Step::build_environment(),
    ]
}

fn debian_packages(config: &ProvisionConfig) -> Vec<String> {
    with_python(
        apt_python(config),
        &["python3-pip", "build-essential", "git", "libffi-dev", "libssl-dev"],
    )
}

fn debian(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Apt)
            .with_env("DEBIAN_FRONTEND", "noninteractive"),
        Step::build_environment(),
    ]
}

fn fedora_packages(config: &ProvisionConfig) -> Vec<String> {
    with_python(
        rpm_python(config),
        &["python3-pip", "gcc", "git", "libffi-devel", "openssl-devel"],
    )
}

fn fedora(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Dnf),
        Step::build_environment(),
    ]
}

fn rhel_packages(config: &ProvisionConfig) -> Vec<String> {
    fedora_packages(config)
}

fn rhel(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::confirm(
            "EPEL repository",
            "Enable the EPEL repository for extra packages?",
            false,
            HostCommand::privileged("yum install -y epel-release"),
        ),
        Step::install_manifest("System packages", PackageManager::Yum),
        Step::build_environment(),
    ]
}

fn arch_packages(_config: &ProvisionConfig) -> Vec<String> {
    with_python(
        vec!["python".to_string()],
        &["python-pip", "base-devel", "git", "libffi", "openssl"],
    )
}

fn arch(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Pacman),
        Step::build_environment(),
    ]
}

fn opensuse_packages(config: &ProvisionConfig) -> Vec<String> {
    with_python(
        rpm_python(config),
        &["python3-pip", "gcc", "git", "libffi-devel", "libopenssl-devel"],
    )
}

fn opensuse(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Zypper),
        Step::build_environment(),
    ]
}

fn alpine_packages(_config: &ProvisionConfig) -> Vec<String> {
    with_python(
        vec!["python3".to_string(), "python3-dev".to_string()],
        &["py3-pip", "build-base", "git", "libffi-dev", "openssl-dev"],
    )
}

fn alpine(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Apk),
        Step::build_environment(),
    ]
}

fn macos_packages(_config: &ProvisionConfig) -> Vec<String> {
    with_python(Vec::new(), &["git", "openssl@3", "libffi"])
}

fn macos(config: &ProvisionConfig) -> Vec<Step> {
    let interpreter = config.environment.interpreter();
    let formula = match config.environment.python_version.as_deref() {
        Some(v) => format!("python@{}", v),
        None => "python".to_string(),
    };
    vec![
        Step::require_tool("brew", "install Homebrew from https://brew.sh"),
        Step::install("Python", PackageManager::Homebrew, &[])
            .with_packages([formula])
            .skip_if_present(&interpreter),
        Step::install_manifest("Build libraries", PackageManager::Homebrew)
            .with_env("HOMEBREW_NO_AUTO_UPDATE", "1"),
        Step::build_environment(),
    ]
}

fn freebsd_packages(_config: &ProvisionConfig) -> Vec<String> {
    with_python(vec!["python3".to_string()], &["git", "libffi"])
}

fn freebsd(_config: &ProvisionConfig) -> Vec<Step> {
    vec![
        Step::install_manifest("System packages", PackageManager::Pkg),
        Step::build_environment(),
    ]
}
