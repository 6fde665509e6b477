//! Feature Providers
//!
//! The backend only decides whether a request may be served. Answering it is
//! up to a [`FeatureProvider`].

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::lsp::document::DocumentState;

/// Answers the gated feature requests for documents that passed the gate.
///
/// Every method defaults to "no answer".
#[tower_lsp::async_trait]
pub trait FeatureProvider: Send + Sync {
    async fn completion(
        &self,
        _document: &DocumentState,
        _params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        Ok(None)
    }

    async fn hover(
        &self,
        _document: &DocumentState,
        _params: HoverParams,
    ) -> LspResult<Option<Hover>> {
        Ok(None)
    }

    async fn goto_definition(
        &self,
        _document: &DocumentState,
        _params: GotoDefinitionParams,
    ) -> LspResult<Option<GotoDefinitionResponse>> {
        Ok(None)
    }

    async fn signature_help(
        &self,
        _document: &DocumentState,
        _params: SignatureHelpParams,
    ) -> LspResult<Option<SignatureHelp>> {
        Ok(None)
    }
}

/// Provider that never answers
#[derive(Debug, Default)]
pub struct NoopProvider;

impl FeatureProvider for NoopProvider {}
