//! Version extraction from a changelog header.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// `name (version) ...`, as in a Debian changelog heading.
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\S+\s+\(([^)\s]+)\)").expect("VERSION_LINE must compile")
});

/// Version from the first line shaped like `name (version)`.
///
/// Returns an empty string when no line matches.
pub fn extract_version(text: &str) -> String {
    text.lines()
        .find_map(|line| VERSION_LINE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// [`extract_version`] over a file. A missing or unreadable file yields an
/// empty string.
pub fn read_version(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => extract_version(&text),
        Err(err) => {
            tracing::debug!("no version from {}: {}", path.display(), err);
            String::new()
        }
    }
}
