//! LLM provider factory.
//!
//! Creates LLM clients from configuration so backends are selected in one
//! place rather than by conditionals scattered through pipeline code.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use docent_core::{DocentError, DocentResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama")
/// * `endpoint` - Optional custom endpoint URL
///
/// # Errors
/// Returns a configuration error for unknown providers.
pub fn create_client(provider: &str, endpoint: Option<&str>) -> DocentResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            Ok(Arc::new(OllamaClient::with_base_url(base_url)))
        }
        _ => Err(DocentError::Config(format!(
            "Unknown LLM provider: '{}'. Supported providers: ollama",
            provider
        ))),
    }
}
