use anyhow::Result;
use kite_gate::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}
