//! MCP server command implementation.

use anyhow::Result;
use tracing::info;

use crate::mcp::CodefetchServer;
use crate::service::Codebase;

/// Serve the codebase to MCP clients over stdio until the client disconnects.
pub async fn run(codebase: Codebase) -> Result<()> {
    info!(
        "Starting MCP server with stdio transport for {}",
        codebase.root().display()
    );
    CodefetchServer::new(codebase).run().await
}
