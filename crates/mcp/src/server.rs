//! MCP server exposing the `ask_<library>` tool.
//!
//! The tool name depends on the configured library, so [`ServerHandler`]
//! is implemented manually: `list_tools` advertises the one tool and
//! `call_tool` dispatches by name. Requests are stateless; the shared
//! state is the read-only pipeline behind an `Arc`, so the host may
//! invoke the tool concurrently.

use std::sync::Arc;

use docent_core::{DocentConfig, DocentError, DocentResult};
use docent_knowledge::AskPipeline;
use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};

/// Fixed text returned to the client when answering fails. The cause is
/// logged server-side and never leaks into the tool result.
const APOLOGY: &str = "Sorry, an error occurred while generating the answer.";

/// MCP server wrapping the answering pipeline.
#[derive(Clone)]
pub struct DocentServer {
    pipeline: Arc<AskPipeline>,
    library: String,
    tool_name: String,
}

impl DocentServer {
    pub fn new(pipeline: Arc<AskPipeline>, library: impl Into<String>) -> Self {
        let library = library.into();
        let tool_name = format!("ask_{}", library);
        Self {
            pipeline,
            library,
            tool_name,
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// The single tool this server advertises.
    pub fn tool_descriptor(&self) -> Tool {
        Tool::new(
            self.tool_name.clone(),
            format!(
                "Ask questions about the {} library: implementation guidance, \
                 API usage, and troubleshooting, answered from the indexed \
                 source code and documentation.",
                self.library
            ),
            Arc::new(question_schema()),
        )
    }

    /// Handle an `ask_<library>` invocation.
    ///
    /// Argument problems are protocol errors (`invalid_params`) raised
    /// before any pipeline step; pipeline failures become an in-band
    /// error result carrying only [`APOLOGY`].
    pub async fn handle_ask(
        &self,
        arguments: Option<&JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let question = arguments
            .and_then(|args| args.get("question"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                McpError::invalid_params("the 'question' argument must be a string", None)
            })?;

        if question.trim().is_empty() {
            return Err(McpError::invalid_params(
                "the 'question' argument must be a non-empty string",
                None,
            ));
        }

        tracing::info!(question, "question received");

        match self.pipeline.answer(question).await {
            Ok(answer) => {
                tracing::info!("response ready");
                let formatted = format!("🤖 **{} Agent**\n\n{}", self.library, answer);
                Ok(CallToolResult::success(vec![Content::text(formatted)]))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to answer question");
                Ok(CallToolResult::error(vec![Content::text(APOLOGY)]))
            }
        }
    }
}

fn question_schema() -> JsonObject {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "question": {
                "type": "string",
                "description": "The question to ask about the library"
            }
        },
        "required": ["question"]
    });
    match schema {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::default(),
    }
}

impl ServerHandler for DocentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "docent".to_string(),
                title: Some(format!("{} Agent", self.library)),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Retrieval-augmented question answering over an indexed library".to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Answers questions about the {} library from its indexed source \
                 code and documentation. Use the {} tool with a natural-language \
                 question.",
                self.library, self.tool_name
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            meta: None,
            tools: vec![self.tool_descriptor()],
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if request.name != self.tool_name {
            return Err(McpError::invalid_params(
                format!("unknown tool: {}", request.name),
                None,
            ));
        }

        self.handle_ask(request.arguments.as_ref()).await
    }
}

/// Start the MCP server on stdio transport.
///
/// Called by the `docent serve` CLI subcommand. Builds the answering
/// pipeline from configuration, then blocks until the client closes
/// stdin. Logging must already be routed to stderr; stdout carries the
/// protocol stream.
pub async fn run_server(config: &DocentConfig) -> DocentResult<()> {
    let pipeline = AskPipeline::from_config(config).await?;
    let server = DocentServer::new(Arc::new(pipeline), config.library.clone());

    tracing::info!(tool = %server.tool_name(), "MCP server listening on stdio");

    let service = server
        .serve(stdio())
        .await
        .map_err(|e| DocentError::Config(format!("MCP server failed to start: {e}")))?;

    service
        .waiting()
        .await
        .map_err(|e| DocentError::Config(format!("MCP server error: {e}")))?;

    Ok(())
}
