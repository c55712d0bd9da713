//! Host signal collection.
//!
//! All detection I/O happens here, once per run. Variant predicates only
//! ever look at the resulting [`HostSignals`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::shell::capture_line;

/// Release marker files read during collection.
pub const MARKER_FILES: &[&str] = &[
    "/etc/debian_version",
    "/etc/fedora-release",
    "/etc/redhat-release",
    "/etc/arch-release",
    "/etc/alpine-release",
    "/etc/os-release",
    "/etc/lsb-release",
];

/// Release-info files searched for a distribution name.
const RELEASE_INFO_FILES: &[&str] = &["/etc/os-release", "/etc/lsb-release"];

/// Immutable snapshot of platform-identifying facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostSignals {
    platform: String,
    markers: BTreeMap<String, String>,
    kernel: String,
    hint: Option<String>,
}

impl HostSignals {
    /// Collect signals from the running host.
    pub fn collect(hint: Option<String>) -> Self {
        let kernel = capture_line("uname -srvm")
            .or_else(|| fs::read_to_string("/proc/sys/kernel/osrelease").ok())
            .map(|k| k.trim().to_string())
            .unwrap_or_default();
        Self::collect_under(Path::new("/"), std::env::consts::OS, &kernel, hint)
    }

    /// Collect marker files relative to `root` with explicit platform and kernel.
    ///
    /// `root` stands in for `/`, so tests can lay out a fake `/etc`.
    pub fn collect_under(root: &Path, platform: &str, kernel: &str, hint: Option<String>) -> Self {
        let mut markers = BTreeMap::new();
        for marker in MARKER_FILES {
            let path = root.join(marker.trim_start_matches('/'));
            if let Ok(content) = fs::read_to_string(&path) {
                markers.insert(marker.to_string(), content);
            }
        }
        tracing::debug!(
            "collected signals: platform={} markers={:?}",
            platform,
            markers.keys().collect::<Vec<_>>()
        );

        Self {
            platform: platform.to_string(),
            markers,
            kernel: kernel.to_string(),
            hint: hint.filter(|h| !h.trim().is_empty()),
        }
    }

    /// Build signals directly from parts (for testing and custom registries).
    pub fn from_parts(
        platform: &str,
        markers: &[(&str, &str)],
        kernel: &str,
        hint: Option<&str>,
    ) -> Self {
        Self {
            platform: platform.to_string(),
            markers: markers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            kernel: kernel.to_string(),
            hint: hint.map(String::from),
        }
    }

    /// Platform identifier (`linux`, `macos`, `freebsd`, ...).
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Raw kernel string.
    pub fn kernel(&self) -> &str {
        &self.kernel
    }

    /// Caller-supplied variant hint.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Marker files that were present, with their contents.
    pub fn markers(&self) -> &BTreeMap<String, String> {
        &self.markers
    }

    /// Whether the marker file at `path` existed.
    pub fn has_marker(&self, path: &str) -> bool {
        self.markers.contains_key(path)
    }

    /// Contents of the marker file at `path`.
    pub fn marker(&self, path: &str) -> Option<&str> {
        self.markers.get(path).map(String::as_str)
    }

    /// Whether a release-info file mentions `name` (case-insensitive).
    pub fn release_mentions(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        RELEASE_INFO_FILES
            .iter()
            .filter_map(|f| self.marker(f))
            .any(|content| content.to_lowercase().contains(&needle))
    }

    /// Whether the hint equals `token` (case-insensitive).
    pub fn hint_is(&self, token: &str) -> bool {
        self.hint
            .as_deref()
            .is_some_and(|h| h.trim().eq_ignore_ascii_case(token))
    }

    /// Kernel release (`6.1.21-v8+`): the first token of the kernel string
    /// that starts with `<major>.<minor>`.
    pub fn kernel_release(&self) -> Option<&str> {
        self.kernel.split_whitespace().find(|token| {
            let mut parts = token.splitn(2, '.');
            let major = parts.next().unwrap_or_default();
            !major.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && parts
                    .next()
                    .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        })
    }

    /// Pretty distribution name from os-release, when present.
    pub fn pretty_name(&self) -> Option<String> {
        let content = self.marker("/etc/os-release")?;
        content.lines().find_map(|line| {
            line.strip_prefix("PRETTY_NAME=")
                .map(|v| v.trim().trim_matches('"').to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_root(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path.trim_start_matches('/'));
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    #[test]
    fn collect_under_reads_present_markers_only() {
        let root = fake_root(&[("/etc/debian_version", "12.5\n")]);
        let signals = HostSignals::collect_under(root.path(), "linux", "Linux host 6.1", None);

        assert!(signals.has_marker("/etc/debian_version"));
        assert_eq!(signals.marker("/etc/debian_version"), Some("12.5\n"));
        assert!(!signals.has_marker("/etc/fedora-release"));
        assert_eq!(signals.platform(), "linux");
    }

    #[test]
    fn empty_root_has_no_markers() {
        let root = TempDir::new().unwrap();
        let signals = HostSignals::collect_under(root.path(), "linux", "", None);
        assert!(signals.markers().is_empty());
    }

    #[test]
    fn blank_hint_is_dropped() {
        let root = TempDir::new().unwrap();
        let signals = HostSignals::collect_under(root.path(), "linux", "", Some("  ".into()));
        assert_eq!(signals.hint(), None);
    }

    #[test]
    fn release_mentions_is_case_insensitive() {
        let signals = HostSignals::from_parts(
            "linux",
            &[("/etc/os-release", "NAME=\"openSUSE Leap\"\nID=opensuse-leap\n")],
            "",
            None,
        );
        assert!(signals.release_mentions("OPENSUSE"));
        assert!(!signals.release_mentions("ubuntu"));
    }

    #[test]
    fn hint_is_ignores_case() {
        let signals = HostSignals::from_parts("linux", &[], "", Some("Raspberry-Pi"));
        assert!(signals.hint_is("raspberry-pi"));
        assert!(!signals.hint_is("pi"));
    }

    #[test]
    fn kernel_release_skips_name_and_build_tokens() {
        let signals =
            HostSignals::from_parts("linux", &[], "Linux 6.1.21-v8+ #1642 SMP PREEMPT aarch64", None);
        assert_eq!(signals.kernel_release(), Some("6.1.21-v8+"));

        let bare = HostSignals::from_parts("linux", &[], "6.6.31+rpt-rpi-2712\n", None);
        assert_eq!(bare.kernel_release(), Some("6.6.31+rpt-rpi-2712"));

        let none = HostSignals::from_parts("linux", &[], "Darwin", None);
        assert_eq!(none.kernel_release(), None);
    }

    #[test]
    fn pretty_name_from_os_release() {
        let signals = HostSignals::from_parts(
            "linux",
            &[("/etc/os-release", "ID=debian\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n")],
            "",
            None,
        );
        assert_eq!(
            signals.pretty_name().as_deref(),
            Some("Debian GNU/Linux 12 (bookworm)")
        );
    }
}
