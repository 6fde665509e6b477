//! Document selectors
//!
//! A selector is an ordered list of `(pattern, scheme)` filters telling the
//! client which open documents a feature activates for.

use tower_lsp::lsp_types::{DocumentFilter, DocumentSelector};

/// Document scheme a filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Saved documents
    File,
    /// Unsaved, newly created documents
    Untitled,
}

impl Scheme {
    /// Schemes every selector covers, in emission order
    pub const ALL: [Scheme; 2] = [Scheme::File, Scheme::Untitled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::File => "file",
            Scheme::Untitled => "untitled",
        }
    }
}

/// One filter per scheme, all sharing `pattern`
pub fn for_pattern(pattern: &str) -> DocumentSelector {
    Scheme::ALL
        .iter()
        .map(|scheme| DocumentFilter {
            language: None,
            scheme: Some(scheme.as_str().to_string()),
            pattern: Some(pattern.to_string()),
        })
        .collect()
}

/// Selector matching any file whose suffix is one of `extensions`.
///
/// The extensions keep their leading dot inside the brace list
/// (`**/*{.js,.go}`). No extensions yields an empty selector rather than a
/// pattern with an empty brace list.
pub fn for_extensions<S: AsRef<str>>(extensions: &[S]) -> DocumentSelector {
    if extensions.is_empty() {
        return Vec::new();
    }

    let joined = extensions
        .iter()
        .map(|ext| ext.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    for_pattern(&format!("**/*{{{}}}", joined))
}
