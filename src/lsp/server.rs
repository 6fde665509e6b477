use std::sync::Arc;

use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::lsp::provider::NoopProvider;
use crate::Config;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    log::info!(
        "starting kite-gate-ls, project settings at {:?}",
        config.project_settings_path
    );

    let (service, socket) = LspService::build(move |client| {
        Backend::new(client, &config, Arc::new(NoopProvider))
    })
    .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}

/// Log to stderr at `level`, unless `RUST_LOG` says otherwise
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when embedded in tests
    let _ = env_logger::Builder::from_env(env).try_init();
}
