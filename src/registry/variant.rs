//! Variant definitions.

use serde::Serialize;

use crate::config::ProvisionConfig;
use crate::detection::HostSignals;
use crate::environment::PackageManifest;
use crate::steps::Step;

/// Pure predicate over host signals.
pub type Predicate = fn(&HostSignals) -> bool;

/// Builds a variant's ordered steps from the configuration.
pub type Procedure = fn(&ProvisionConfig) -> Vec<Step>;

/// The system packages a variant installs for the configuration.
pub type PackageSet = fn(&ProvisionConfig) -> Vec<String>;

/// Kind of host a variant provisions, used for the completion instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostProfile {
    /// Used from a local keyboard and screen.
    Desktop,
    /// Reached over the network.
    Headless,
}

/// One provisioning variant.
#[derive(Clone)]
pub struct Variant {
    /// Stable identifier (`debian`, `raspberry-pi`, ...).
    pub label: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    pub profile: HostProfile,
    pub matches: Predicate,
    pub packages: PackageSet,
    pub procedure: Procedure,
}

impl Variant {
    /// Whether this variant accepts `signals`.
    pub fn accepts(&self, signals: &HostSignals) -> bool {
        (self.matches)(signals)
    }

    /// The ordered steps for `config`.
    pub fn steps(&self, config: &ProvisionConfig) -> Vec<Step> {
        (self.procedure)(config)
    }

    /// The run manifest: this variant's package set followed by
    /// `extra_packages`, first occurrence wins.
    pub fn manifest(&self, config: &ProvisionConfig, dependencies: Vec<String>) -> PackageManifest {
        let mut system = Vec::new();
        for package in (self.packages)(config)
            .into_iter()
            .chain(config.extra_packages.iter().cloned())
        {
            if !system.contains(&package) {
                system.push(package);
            }
        }
        PackageManifest::new(system, dependencies)
    }
}

impl std::fmt::Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("label", &self.label)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}
