//! GNS3 MCP server binary entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gns3_mcp::client::GnsClient;
use gns3_mcp::config;
use gns3_mcp::server::{self, Dispatcher};
use gns3_mcp::tools;

#[tokio::main]
async fn main() {
    // stdout carries JSON-RPC frames; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> gns3_mcp::error::Result<()> {
    let config = config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        scheme = %config.scheme,
        auth = config.auth_required,
        "starting GNS3 MCP server"
    );

    let client = Arc::new(GnsClient::new(&config)?);
    let registry = Arc::new(tools::build_registry(client)?);
    info!(tools = registry.len(), "tool registry built");

    let dispatcher = Arc::new(Dispatcher::new(registry));
    server::serve(tokio::io::stdin(), tokio::io::stdout(), dispatcher).await
}
