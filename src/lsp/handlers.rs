use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::gate::FeatureCategory;
use crate::lsp::backend::Backend;

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling go-to-definition requests
#[tower_lsp::async_trait]
pub trait HandleDefinition {
    async fn handle_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> LspResult<Option<GotoDefinitionResponse>>;
}

/// Trait for handling signature help requests
#[tower_lsp::async_trait]
pub trait HandleSignatureHelp {
    async fn handle_signature_help(
        &self,
        params: SignatureHelpParams,
    ) -> LspResult<Option<SignatureHelp>>;
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let document = match self.admitted_document(uri, FeatureCategory::Hover).await {
            Some(document) => document,
            None => return Ok(None),
        };

        self.provider.hover(&document, params).await
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let category = self.completion_category(uri).await;
        let document = match self.admitted_document(uri, category).await {
            Some(document) => document,
            None => return Ok(None),
        };

        self.provider.completion(&document, params).await
    }
}

#[tower_lsp::async_trait]
impl HandleDefinition for Backend {
    async fn handle_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> LspResult<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let document = match self
            .admitted_document(uri, FeatureCategory::Definitions)
            .await
        {
            Some(document) => document,
            None => return Ok(None),
        };

        self.provider.goto_definition(&document, params).await
    }
}

#[tower_lsp::async_trait]
impl HandleSignatureHelp for Backend {
    async fn handle_signature_help(
        &self,
        params: SignatureHelpParams,
    ) -> LspResult<Option<SignatureHelp>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let document = match self
            .admitted_document(uri, FeatureCategory::Signatures)
            .await
        {
            Some(document) => document,
            None => return Ok(None),
        };

        self.provider.signature_help(&document, params).await
    }
}
