//! Ordered variant selection.

use crate::detection::HostSignals;

use super::builtin::builtin_variants;
use super::variant::Variant;

/// Ordered table of variants.
#[derive(Debug, Clone)]
pub struct Registry {
    variants: Vec<Variant>,
}

impl Registry {
    /// Create a registry from `variants` in priority order.
    pub fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self::new(builtin_variants())
    }

    /// Append a variant at the lowest priority.
    pub fn push(&mut self, variant: Variant) {
        self.variants.push(variant);
    }

    /// Variants in priority order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look up a variant by label.
    pub fn get(&self, label: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.label == label)
    }

    /// The first variant that accepts `signals`.
    ///
    /// `None` means the host is not supported; it is not an error.
    pub fn select(&self, signals: &HostSignals) -> Option<&Variant> {
        let selected = self.variants.iter().find(|v| v.accepts(signals));
        match selected {
            Some(variant) => tracing::debug!("selected variant '{}'", variant.label),
            None => tracing::debug!("no variant accepts platform '{}'", signals.platform()),
        }
        selected
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
