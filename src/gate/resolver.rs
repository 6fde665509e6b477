//! Feature Gate Resolver
//!
//! Holds the supported extension table, the distinguished language family and
//! a [`ConfigSource`], and memoizes the two values derived from configuration:
//! the effective enabled extensions and whether the family is enabled.
//!
//! Each memo slot is filled on first access and kept until [`invalidate`] or
//! [`reconfigure`] clears it.
//!
//! [`invalidate`]: FeatureGateResolver::invalidate
//! [`reconfigure`]: FeatureGateResolver::reconfigure

use std::sync::OnceLock;

use tower_lsp::lsp_types::DocumentSelector;

use super::category::FeatureCategory;
use super::{gated, selector, ConfigSource, Gate};
use crate::extensions::{self, LanguageFamily, PYTHON, SUPPORTED_EXTENSIONS};

#[derive(Debug)]
pub struct FeatureGateResolver<C> {
    supported: Vec<String>,
    family: LanguageFamily,
    source: C,
    enabled: OnceLock<Vec<String>>,
    family_enabled: OnceLock<bool>,
}

impl<C: ConfigSource> FeatureGateResolver<C> {
    /// Resolver over the built-in extension table with Python as the family
    pub fn new(source: C) -> Self {
        Self::with_table(SUPPORTED_EXTENSIONS, PYTHON, source)
    }

    /// Resolver over a custom extension table
    pub fn with_table<S: AsRef<str>>(supported: &[S], family: LanguageFamily, source: C) -> Self {
        Self {
            supported: supported.iter().map(|s| s.as_ref().to_string()).collect(),
            family,
            source,
            enabled: OnceLock::new(),
            family_enabled: OnceLock::new(),
        }
    }

    pub fn family(&self) -> &LanguageFamily {
        &self.family
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Supported extensions, unfiltered, in declaration order
    pub fn supported_extensions(&self) -> &[String] {
        &self.supported
    }

    /// True iff the file's extension is supported, ignoring the disabled list
    pub fn is_supported_file(&self, file_name: &str) -> bool {
        let ext = extensions::extension_of(file_name);
        self.supported.iter().any(|s| s == ext)
    }

    /// Supported extensions minus the disabled ones, in supported order.
    ///
    /// Reads configuration on the first call after construction or
    /// invalidation only.
    pub fn effective_enabled_extensions(&self) -> &[String] {
        self.enabled.get_or_init(|| {
            let disabled = self.read_disabled();
            let enabled: Vec<String> = self
                .supported
                .iter()
                .filter(|ext| !disabled.contains(ext))
                .cloned()
                .collect();
            log::debug!(
                "resolved {} of {} supported extensions as enabled",
                enabled.len(),
                self.supported.len()
            );
            enabled
        })
    }

    /// True iff the file's extension is supported and not disabled
    pub fn is_eligible_file(&self, file_name: &str) -> bool {
        let ext = extensions::extension_of(file_name);
        !ext.is_empty() && self.effective_enabled_extensions().iter().any(|e| e == ext)
    }

    /// True iff the family's primary extension is not disabled
    pub fn distinguished_family_enabled(&self) -> bool {
        *self.family_enabled.get_or_init(|| {
            let enabled = !self
                .read_disabled()
                .iter()
                .any(|ext| ext == self.family.primary);
            log::debug!("{} family enabled: {}", self.family.name, enabled);
            enabled
        })
    }

    /// Generic completions: every enabled extension outside the family
    pub fn completions_selector(&self) -> DocumentSelector {
        let generic: Vec<&str> = self
            .effective_enabled_extensions()
            .iter()
            .map(String::as_str)
            .filter(|ext| !self.family.contains(ext))
            .collect();
        selector::for_extensions(&generic)
    }

    pub fn full_completions_selector(&self) -> DocumentSelector {
        self.family_selector()
    }

    pub fn definitions_selector(&self) -> DocumentSelector {
        self.family_selector()
    }

    pub fn hover_selector(&self) -> DocumentSelector {
        self.family_selector()
    }

    pub fn signatures_selector(&self) -> DocumentSelector {
        self.family_selector()
    }

    /// Selector for any category
    pub fn selector(&self, category: FeatureCategory) -> DocumentSelector {
        match category {
            FeatureCategory::Completions => self.completions_selector(),
            FeatureCategory::FullCompletions => self.full_completions_selector(),
            FeatureCategory::Definitions => self.definitions_selector(),
            FeatureCategory::Hover => self.hover_selector(),
            FeatureCategory::Signatures => self.signatures_selector(),
        }
    }

    /// Whether a request of `category` for `file_name` falls inside that
    /// category's selector.
    pub fn allows_file(&self, category: FeatureCategory, file_name: &str) -> bool {
        let ext = extensions::extension_of(file_name);
        if category.is_family_feature() {
            self.family.contains(ext) && self.distinguished_family_enabled()
        } else {
            !self.family.contains(ext) && self.is_eligible_file(file_name)
        }
    }

    /// Drop both memoized values; the next access re-reads configuration
    pub fn invalidate(&mut self) {
        self.enabled.take();
        self.family_enabled.take();
    }

    /// Swap the configuration source and invalidate
    pub fn reconfigure(&mut self, source: C) {
        self.source = source;
        self.invalidate();
    }

    fn family_selector(&self) -> DocumentSelector {
        let glob = self.family.glob();
        gated(self, |()| selector::for_pattern(&glob))(())
    }

    fn read_disabled(&self) -> Vec<String> {
        self.source.disabled_extensions().unwrap_or_else(|| {
            log::warn!("disabled file extensions unavailable, treating as empty");
            Vec::new()
        })
    }
}

impl<C: ConfigSource> Gate for FeatureGateResolver<C> {
    fn allows(&self) -> bool {
        self.distinguished_family_enabled()
    }
}
