//! Supported file extensions
//!
//! Static table of the file extensions the server offers features for, and
//! the extension extraction every eligibility check goes through.

/// All supported file extensions, with their leading dot, in declaration order
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".c", ".cc", ".cpp", ".cs", ".css", ".go", ".h", ".hpp", ".html", ".java", ".js", ".jsx",
    ".kt", ".less", ".m", ".php", ".py", ".pyw", ".rb", ".scala", ".sh", ".ts", ".tsx", ".vue",
];

/// A language whose files get the full feature set (full completions,
/// definitions, hover, signatures) instead of generic completions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageFamily {
    pub name: &'static str,
    /// Token whose presence in the disabled list turns the whole family off
    pub primary: &'static str,
    pub extensions: &'static [&'static str],
}

/// The distinguished family served by the server
pub const PYTHON: LanguageFamily = LanguageFamily {
    name: "python",
    primary: ".py",
    extensions: &[".py", ".pyw"],
};

impl LanguageFamily {
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(&ext)
    }

    /// Glob matching every file of the family, e.g. `**/*.{py,pyw}`
    pub fn glob(&self) -> String {
        let stems: Vec<&str> = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();
        format!("**/*.{{{}}}", stems.join(","))
    }
}

/// Returns the supported extensions, unfiltered
pub fn supported_extensions() -> Vec<String> {
    SUPPORTED_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// Extension of the last path segment, including the leading dot.
///
/// Empty when the segment has no dot, or when its only dot is the first
/// character (`.bashrc`).
pub fn extension_of(file_name: &str) -> &str {
    let segment = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match segment.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &segment[idx..],
    }
}

/// Check if a file has a supported extension, regardless of configuration
pub fn is_supported_file(file_name: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(file_name))
}
