//! Feature categories registered with the client

use serde_json::{json, Value};

/// A language feature registered against its own document selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureCategory {
    /// Completions for every enabled extension outside the family
    Completions,
    FullCompletions,
    Definitions,
    Hover,
    Signatures,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 5] = [
        FeatureCategory::Completions,
        FeatureCategory::FullCompletions,
        FeatureCategory::Definitions,
        FeatureCategory::Hover,
        FeatureCategory::Signatures,
    ];

    /// Categories only offered for the distinguished family
    pub const FAMILY: [FeatureCategory; 4] = [
        FeatureCategory::FullCompletions,
        FeatureCategory::Definitions,
        FeatureCategory::Hover,
        FeatureCategory::Signatures,
    ];

    pub fn is_family_feature(&self) -> bool {
        !matches!(self, FeatureCategory::Completions)
    }

    /// LSP request method the registration is for
    pub fn method(&self) -> &'static str {
        match self {
            FeatureCategory::Completions | FeatureCategory::FullCompletions => {
                "textDocument/completion"
            }
            FeatureCategory::Definitions => "textDocument/definition",
            FeatureCategory::Hover => "textDocument/hover",
            FeatureCategory::Signatures => "textDocument/signatureHelp",
        }
    }

    /// Registration id, unique per category
    pub fn registration_id(&self) -> &'static str {
        match self {
            FeatureCategory::Completions => "kite/completions",
            FeatureCategory::FullCompletions => "kite/fullCompletions",
            FeatureCategory::Definitions => "kite/definitions",
            FeatureCategory::Hover => "kite/hover",
            FeatureCategory::Signatures => "kite/signatures",
        }
    }

    /// Method-specific registration options, merged next to the selector
    pub fn extra_options(&self) -> Value {
        match self {
            FeatureCategory::Completions => json!({
                "resolveProvider": false,
                "triggerCharacters": ["."],
            }),
            FeatureCategory::FullCompletions => json!({
                "resolveProvider": false,
                "triggerCharacters": [".", "(", ","],
            }),
            FeatureCategory::Signatures => json!({
                "triggerCharacters": ["(", ","],
                "retriggerCharacters": [","],
            }),
            FeatureCategory::Definitions | FeatureCategory::Hover => json!({}),
        }
    }
}
