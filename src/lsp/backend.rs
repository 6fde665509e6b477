use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::constants::OFFSET_ENCODING;
use crate::extensions::extension_of;
use crate::gate::{FeatureCategory, FeatureGateResolver};
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleCompletion, HandleDefinition, HandleHover, HandleSignatureHelp};
use crate::lsp::provider::FeatureProvider;
use crate::lsp::registration::{registrations_for, unregistrations_for};
use crate::lsp::status::{KiteStatus, StatusParams};
use crate::settings::{Settings, KITE_SECTION, WORKBENCH_SECTION};
use crate::Config;

/// What the client told us it can do during `initialize`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClientSupport {
    /// Per-method dynamic registration support
    pub completion_dynamic: bool,
    pub hover_dynamic: bool,
    pub definition_dynamic: bool,
    pub signature_help_dynamic: bool,
    pub configuration: bool,
}

impl ClientSupport {
    pub fn from_capabilities(capabilities: &ClientCapabilities) -> Self {
        let text_document = capabilities.text_document.as_ref();

        Self {
            completion_dynamic: text_document
                .and_then(|t| t.completion.as_ref())
                .and_then(|c| c.dynamic_registration)
                .unwrap_or(false),
            hover_dynamic: text_document
                .and_then(|t| t.hover.as_ref())
                .and_then(|h| h.dynamic_registration)
                .unwrap_or(false),
            definition_dynamic: text_document
                .and_then(|t| t.definition.as_ref())
                .and_then(|d| d.dynamic_registration)
                .unwrap_or(false),
            signature_help_dynamic: text_document
                .and_then(|t| t.signature_help.as_ref())
                .and_then(|s| s.dynamic_registration)
                .unwrap_or(false),
            configuration: capabilities
                .workspace
                .as_ref()
                .and_then(|w| w.configuration)
                .unwrap_or(false),
        }
    }

    /// Whether `category` is registered at runtime rather than advertised
    /// in `initialize`
    pub fn registers_dynamically(&self, category: FeatureCategory) -> bool {
        match category {
            FeatureCategory::Completions | FeatureCategory::FullCompletions => {
                self.completion_dynamic
            }
            FeatureCategory::Definitions => self.definition_dynamic,
            FeatureCategory::Hover => self.hover_dynamic,
            FeatureCategory::Signatures => self.signature_help_dynamic,
        }
    }

    pub fn any_dynamic(&self) -> bool {
        FeatureCategory::ALL
            .iter()
            .any(|category| self.registers_dynamically(*category))
    }
}

/// Registration bookkeeping, guarded as one unit so refreshes apply in order
#[derive(Debug, Default)]
struct RegistrationState {
    /// Latest settings layer received from the client
    client_settings: Option<Settings>,
    registrations: Vec<Registration>,
}

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub resolver: Arc<RwLock<FeatureGateResolver<Settings>>>,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub provider: Arc<dyn FeatureProvider>,
    /// Command-line and file settings, the base client settings merge onto
    base_settings: Settings,
    support: Mutex<ClientSupport>,
    state: Mutex<RegistrationState>,
}

impl Backend {
    pub fn new(client: Client, config: &Config, provider: Arc<dyn FeatureProvider>) -> Self {
        Self::with_settings(client, config.base_settings(), provider)
    }

    pub fn with_settings(
        client: Client,
        base_settings: Settings,
        provider: Arc<dyn FeatureProvider>,
    ) -> Self {
        let resolver = FeatureGateResolver::new(base_settings.clone());

        Self {
            client,
            resolver: Arc::new(RwLock::new(resolver)),
            documents: Arc::new(Mutex::new(HashMap::new())),
            provider,
            base_settings,
            support: Mutex::new(ClientSupport::default()),
            state: Mutex::new(RegistrationState::default()),
        }
    }

    pub async fn client_support(&self) -> ClientSupport {
        *self.support.lock().await
    }

    /// Clone of the open document at `uri`, if `category` may serve it
    pub async fn admitted_document(
        &self,
        uri: &Url,
        category: FeatureCategory,
    ) -> Option<DocumentState> {
        let document = self.documents.lock().await.get(uri).cloned()?;
        let allowed = self
            .resolver
            .read()
            .await
            .allows_file(category, document.file_name());

        if !allowed {
            log::debug!("{:?} not enabled for {}", category, uri);
            return None;
        }
        Some(document)
    }

    /// Completion category for a document: full completions for the
    /// distinguished family, generic completions otherwise.
    pub async fn completion_category(&self, uri: &Url) -> FeatureCategory {
        let resolver = self.resolver.read().await;
        if resolver.family().contains(extension_of(uri.path())) {
            FeatureCategory::FullCompletions
        } else {
            FeatureCategory::Completions
        }
    }

    /// Re-resolve the gate from fresh settings and re-register features.
    ///
    /// `pushed` are settings the client sent inline and are overlaid on the
    /// previous client layer; without them the client is asked through
    /// `workspace/configuration` when it supports it. Refreshes hold the
    /// registration state for their whole duration, so the registrations the
    /// client ends up with always match the resolver.
    pub async fn refresh_settings(&self, pushed: Option<Settings>) {
        let mut state = self.state.lock().await;

        let client_settings = match pushed {
            Some(layer) => Some(match state.client_settings.take() {
                Some(previous) => previous.merge(layer),
                None => layer,
            }),
            None => match self.pull_client_settings().await {
                Some(pulled) => Some(pulled),
                None => state.client_settings.take(),
            },
        };

        let settings = match &client_settings {
            Some(layer) => self.base_settings.clone().merge(layer.clone()),
            None => self.base_settings.clone(),
        };
        state.client_settings = client_settings;
        let theme = settings.color_theme().map(str::to_string);

        let support = self.client_support().await;
        let registrations = {
            let mut resolver = self.resolver.write().await;
            resolver.reconfigure(settings);
            registrations_for(&resolver, |category| support.registers_dynamically(category))
        };

        if support.any_dynamic() {
            self.reregister(&mut state, registrations, theme.as_deref()).await;
        }
    }

    async fn pull_client_settings(&self) -> Option<Settings> {
        if !self.client_support().await.configuration {
            return None;
        }

        let items = [KITE_SECTION, WORKBENCH_SECTION]
            .iter()
            .map(|section| ConfigurationItem {
                scope_uri: None,
                section: Some(section.to_string()),
            })
            .collect();

        match self.client.configuration(items).await {
            Ok(values) => Some(Settings::from_client_sections(&values)),
            Err(e) => {
                log::warn!("workspace/configuration failed: {}", e);
                None
            }
        }
    }

    async fn reregister(
        &self,
        state: &mut RegistrationState,
        registrations: Vec<Registration>,
        theme: Option<&str>,
    ) {
        if !state.registrations.is_empty() {
            let unregistrations = unregistrations_for(&state.registrations);
            if let Err(e) = self.client.unregister_capability(unregistrations).await {
                log::warn!("Failed to unregister features: {}", e);
            }
            state.registrations.clear();
        }

        let count = registrations.len();
        if count == 0 {
            self.client
                .send_notification::<KiteStatus>(StatusParams::ready(0))
                .await;
            return;
        }

        match self.client.register_capability(registrations.clone()).await {
            Ok(()) => {
                state.registrations = registrations;
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("Registered {} gated feature(s)", count),
                    )
                    .await;
                self.client
                    .send_notification::<KiteStatus>(StatusParams::ready(count))
                    .await;
            }
            Err(e) => {
                let message = format!("Failed to register features: {}", e);
                log::error!("{}", message);
                self.client
                    .log_message(MessageType::ERROR, message.clone())
                    .await;
                self.client
                    .send_notification::<KiteStatus>(StatusParams::error(message, theme))
                    .await;
            }
        }
    }
}

/// Capabilities advertised in `initialize`.
///
/// Any feature the client cannot register at runtime is advertised here,
/// and each of its requests goes through the gate.
pub fn server_capabilities(support: ClientSupport) -> ServerCapabilities {
    let mut capabilities = ServerCapabilities {
        position_encoding: Some(PositionEncodingKind::new(OFFSET_ENCODING)),
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        ..Default::default()
    };

    if !support.hover_dynamic {
        capabilities.hover_provider = Some(HoverProviderCapability::Simple(true));
    }
    if !support.completion_dynamic {
        capabilities.completion_provider = Some(CompletionOptions {
            resolve_provider: Some(false),
            trigger_characters: Some(vec![".".to_string(), "(".to_string()]),
            ..Default::default()
        });
    }
    if !support.definition_dynamic {
        capabilities.definition_provider = Some(OneOf::Left(true));
    }
    if !support.signature_help_dynamic {
        capabilities.signature_help_provider = Some(SignatureHelpOptions {
            trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
            retrigger_characters: Some(vec![",".to_string()]),
            work_done_progress_options: Default::default(),
        });
    }

    capabilities
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        let support = ClientSupport::from_capabilities(&params.capabilities);
        *self.support.lock().await = support;
        log::info!("client support: {:?}", support);

        Ok(InitializeResult {
            capabilities: server_capabilities(support),
            server_info: Some(ServerInfo {
                name: "kite-gate-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "kite-gate-ls initialized")
            .await;
        self.refresh_settings(None).await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        log::info!("configuration changed, re-resolving feature gate");
        self.refresh_settings(Settings::from_pushed(&params.settings)).await;
    }

    async fn hover(&self, params: HoverParams) -> tower_lsp::jsonrpc::Result<Option<Hover>> {
        self.handle_hover(params).await
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<CompletionResponse>> {
        self.handle_completion(params).await
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<GotoDefinitionResponse>> {
        self.handle_definition(params).await
    }

    async fn signature_help(
        &self,
        params: SignatureHelpParams,
    ) -> tower_lsp::jsonrpc::Result<Option<SignatureHelp>> {
        self.handle_signature_help(params).await
    }

    // Store opened documents for the providers
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        let doc_state = DocumentState {
            uri: item.uri.clone(),
            content: item.text,
            version: item.version,
        };
        self.documents.lock().await.insert(item.uri, doc_state);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().last() {
            let doc_state = DocumentState {
                uri: uri.clone(),
                content: change.text,
                version: params.text_document.version,
            };
            self.documents.lock().await.insert(uri, doc_state);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.lock().await.remove(&params.text_document.uri);
    }
}
