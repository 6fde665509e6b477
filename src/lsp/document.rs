use tower_lsp::lsp_types::Url;

/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub uri: Url,
    pub content: String,
    pub version: i32,
}

impl DocumentState {
    /// Name the gate checks against: the URI path, which for `untitled:`
    /// documents is the editor-assigned title.
    pub fn file_name(&self) -> &str {
        self.uri.path()
    }
}
