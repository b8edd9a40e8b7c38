//! MCP server interface for the docent question-answering pipeline.
//!
//! Exposes a single `ask_<library>` tool over stdio transport so MCP
//! hosts (Claude Desktop, Cursor, VS Code Copilot) can query the indexed
//! library. The tool name is derived from configuration, so the handler
//! is written by hand rather than with the `#[tool]` macros.

pub mod server;

pub use server::{run_server, DocentServer};
