//! Package manifests.
//!
//! Package names and dependency specifiers are opaque strings: nothing here
//! checks that they exist.

use std::fs;
use std::path::Path;

use crate::config::ProvisionConfig;
use crate::error::Result;

/// Ordered system packages and application dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// Packages installed through the system package manager.
    pub system_packages: Vec<String>,
    /// Specifiers installed into the isolated environment.
    pub application_dependencies: Vec<String>,
}

impl PackageManifest {
    /// Create a manifest from both lists.
    pub fn new(system_packages: Vec<String>, application_dependencies: Vec<String>) -> Self {
        Self {
            system_packages,
            application_dependencies,
        }
    }
}

/// Parse a requirements-style file into specifiers.
///
/// Blank lines, `#` comments and option lines starting with `-` are dropped.
/// Trailing comments (`#` after any whitespace) are stripped.
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_comment)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(String::from)
        .collect()
}

fn strip_comment(line: &str) -> &str {
    line.char_indices()
        .find(|&(idx, c)| c == '#' && line[..idx].ends_with(char::is_whitespace))
        .map_or(line, |(idx, _)| &line[..idx])
}

/// Application dependencies for `config`: the manifest file's entries
/// followed by inline `dependencies`, first occurrence wins.
///
/// A missing manifest file contributes nothing.
pub fn load_dependencies(config: &ProvisionConfig) -> Result<Vec<String>> {
    let mut deps = match config.environment.requirements.as_deref() {
        Some(path) => read_manifest_file(path)?,
        None => Vec::new(),
    };
    deps.extend(config.dependencies.iter().cloned());
    Ok(dedupe(deps))
}

fn read_manifest_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        tracing::debug!("no dependency manifest at {}", path.display());
        return Ok(Vec::new());
    }
    Ok(parse_requirements(&fs::read_to_string(path)?))
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
