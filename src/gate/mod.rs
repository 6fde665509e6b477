//! Feature Gating
//!
//! Decides which documents get which language features, based on the
//! supported extension table and the user's disabled-extension setting.

pub mod category;
pub mod resolver;
pub mod selector;

pub use category::FeatureCategory;
pub use resolver::FeatureGateResolver;
pub use selector::Scheme;

/// Where the resolver reads the disabled-extension list from.
///
/// `None` means the setting is unavailable; the resolver treats that as an
/// empty list.
pub trait ConfigSource {
    fn disabled_extensions(&self) -> Option<Vec<String>>;
}

impl ConfigSource for Vec<String> {
    fn disabled_extensions(&self) -> Option<Vec<String>> {
        Some(self.clone())
    }
}

impl ConfigSource for Option<Vec<String>> {
    fn disabled_extensions(&self) -> Option<Vec<String>> {
        self.clone()
    }
}

/// A yes/no condition guarding a feature
pub trait Gate {
    fn allows(&self) -> bool;
}

impl<F: Fn() -> bool> Gate for F {
    fn allows(&self) -> bool {
        self()
    }
}

/// Wrap `operation` so it only runs while `gate` allows it.
///
/// The returned callable takes the same input. When the gate is closed it
/// returns `R::default()` (an empty selector, for selectors) without calling
/// `operation`.
pub fn gated<'a, G, A, R, F>(gate: &'a G, operation: F) -> impl Fn(A) -> R + 'a
where
    G: Gate + ?Sized,
    R: Default,
    F: Fn(A) -> R + 'a,
{
    move |args| {
        if !gate.allows() {
            return R::default();
        }
        operation(args)
    }
}
