//! Serve command handler.
//!
//! Starts the MCP server on stdio and blocks until the client
//! disconnects.

use clap::Args;
use docent_core::{DocentConfig, DocentResult};

/// Serve the `ask_<library>` tool over MCP stdio
#[derive(Args, Debug)]
pub struct ServeCommand {}

impl ServeCommand {
    pub async fn execute(&self, config: &DocentConfig) -> DocentResult<()> {
        tracing::info!(
            tool = %config.tool_name(),
            index = %config.index_path().display(),
            "starting MCP server"
        );

        docent_mcp::run_server(config).await
    }
}
