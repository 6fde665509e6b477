//! Dynamic capability registration
//!
//! Turns the resolver's selectors into `client/registerCapability`
//! registrations. A category with an empty selector, or one the client cannot
//! register at runtime, is left out.

use serde_json::Value;
use tower_lsp::lsp_types::{Registration, TextDocumentRegistrationOptions, Unregistration};

use crate::gate::{ConfigSource, FeatureCategory, FeatureGateResolver};

/// Registrations for every category `dynamic` accepts whose selector is
/// non-empty
pub fn registrations_for<C, F>(resolver: &FeatureGateResolver<C>, dynamic: F) -> Vec<Registration>
where
    C: ConfigSource,
    F: Fn(FeatureCategory) -> bool,
{
    FeatureCategory::ALL
        .iter()
        .filter(|category| dynamic(**category))
        .filter_map(|category| {
            let document_selector = resolver.selector(*category);
            if document_selector.is_empty() {
                log::info!("{:?} disabled by configuration, not registering", category);
                return None;
            }

            let mut options = serde_json::to_value(TextDocumentRegistrationOptions {
                document_selector: Some(document_selector),
            })
            .ok()?;
            if let (Value::Object(options), Value::Object(extra)) =
                (&mut options, category.extra_options())
            {
                options.extend(extra);
            }

            Some(Registration {
                id: category.registration_id().to_string(),
                method: category.method().to_string(),
                register_options: Some(options),
            })
        })
        .collect()
}

/// Matching unregistrations for a previous set of registrations
pub fn unregistrations_for(registrations: &[Registration]) -> Vec<Unregistration> {
    registrations
        .iter()
        .map(|r| Unregistration {
            id: r.id.clone(),
            method: r.method.clone(),
        })
        .collect()
}
