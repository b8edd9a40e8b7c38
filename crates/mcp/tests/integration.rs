//! Tests for the MCP tool surface using an in-memory pipeline.

use std::sync::Arc;

use docent_core::{DocentError, DocentResult};
use docent_knowledge::embeddings::HashEmbedder;
use docent_knowledge::index::VectorIndex;
use docent_knowledge::rag::{PromptTemplate, Retriever};
use docent_knowledge::{AskPipeline, IndexRecord, RetrievedChunk};
use docent_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use docent_mcp::DocentServer;
use rmcp::model::*;
use rmcp::ServerHandler;
use serde_json::json;

struct StaticIndex {
    chunks: Vec<RetrievedChunk>,
}

#[async_trait::async_trait]
impl VectorIndex for StaticIndex {
    async fn rebuild(&self, _records: &[IndexRecord]) -> DocentResult<usize> {
        Err(DocentError::Index("read-only".into()))
    }

    async fn query(&self, _vector: &[f32], k: usize) -> DocentResult<Vec<RetrievedChunk>> {
        Ok(self.chunks.iter().take(k).cloned().collect())
    }

    async fn count_rows(&self) -> DocentResult<usize> {
        Ok(self.chunks.len())
    }
}

struct EchoLlm;

#[async_trait::async_trait]
impl LlmClient for EchoLlm {
    fn provider_name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: &LlmRequest) -> DocentResult<LlmResponse> {
        Ok(LlmResponse {
            content: format!("echo: {} chars of prompt", request.prompt.len()),
            model: request.model.clone(),
            usage: LlmUsage::new(0, 0),
        })
    }
}

struct FailingLlm;

#[async_trait::async_trait]
impl LlmClient for FailingLlm {
    fn provider_name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: &LlmRequest) -> DocentResult<LlmResponse> {
        Err(DocentError::Llm("model unreachable".into()))
    }
}

fn test_server(llm: Arc<dyn LlmClient>) -> DocentServer {
    let index = StaticIndex {
        chunks: vec![RetrievedChunk {
            text: "func GetForecast(city string) (*Forecast, error)".to_string(),
            source: "weather.go".to_string(),
        }],
    };
    let retriever = Retriever::new(Arc::new(index), Arc::new(HashEmbedder::new(64)), 6);
    let template = PromptTemplate::new("weatherlib", "Go");
    let pipeline = AskPipeline::new(retriever, llm, template, "gemma3");
    DocentServer::new(Arc::new(pipeline), "weatherlib")
}

fn extract_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(t) => &t.text,
        _ => panic!("expected text content"),
    }
}

fn args(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => panic!("expected object"),
    }
}

#[test]
fn server_info_names_the_tool() {
    let server = test_server(Arc::new(EchoLlm));
    let info = server.get_info();

    assert_eq!(info.server_info.name, "docent");
    assert!(info.instructions.unwrap().contains("ask_weatherlib"));
}

#[test]
fn tool_name_follows_library() {
    let server = test_server(Arc::new(EchoLlm));
    assert_eq!(server.tool_name(), "ask_weatherlib");

    let tool = server.tool_descriptor();
    assert_eq!(tool.name, "ask_weatherlib");
    let schema = tool.input_schema;
    assert_eq!(schema["required"], json!(["question"]));
    assert_eq!(schema["properties"]["question"]["type"], json!("string"));
}

#[tokio::test]
async fn ask_returns_banner_and_answer() {
    let server = test_server(Arc::new(EchoLlm));
    let arguments = args(json!({ "question": "How do I get a forecast?" }));

    let result = server.handle_ask(arguments.as_ref()).await.unwrap();

    assert_ne!(result.is_error, Some(true));
    let text = extract_text(&result);
    assert!(text.starts_with("🤖 **weatherlib Agent**\n\n"));
    assert!(text.contains("echo:"));
}

#[tokio::test]
async fn missing_question_is_invalid_params() {
    let server = test_server(Arc::new(EchoLlm));
    let arguments = args(json!({ "query": "wrong key" }));

    let err = server.handle_ask(arguments.as_ref()).await.unwrap_err();
    assert!(err.message.contains("question"));
}

#[tokio::test]
async fn non_string_question_is_invalid_params() {
    let server = test_server(Arc::new(EchoLlm));
    let arguments = args(json!({ "question": 42 }));

    assert!(server.handle_ask(arguments.as_ref()).await.is_err());
}

#[tokio::test]
async fn empty_question_is_invalid_params() {
    let server = test_server(Arc::new(EchoLlm));
    let arguments = args(json!({ "question": "   " }));

    assert!(server.handle_ask(arguments.as_ref()).await.is_err());
}

#[tokio::test]
async fn no_arguments_is_invalid_params() {
    let server = test_server(Arc::new(EchoLlm));
    assert!(server.handle_ask(None).await.is_err());
}

#[tokio::test]
async fn pipeline_failure_returns_fixed_apology() {
    let server = test_server(Arc::new(FailingLlm));
    let arguments = args(json!({ "question": "How do I get a forecast?" }));

    let result = server.handle_ask(arguments.as_ref()).await.unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = extract_text(&result);
    assert!(text.contains("Sorry"));
    // the cause must not leak into the client payload
    assert!(!text.contains("model unreachable"));
}
