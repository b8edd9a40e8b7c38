//! Embedding providers.
//!
//! The embedder maps a text segment to a fixed-dimensionality vector. The
//! identical provider and model must be used at ingestion and query time;
//! both pipelines construct their provider from the same
//! [`EmbeddingSettings`], selected here rather than by conditionals in
//! pipeline code.

pub mod hash;
pub mod ollama;

pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedder;

use docent_core::config::EmbeddingSettings;
use docent_core::{DocentError, DocentResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Provider name (e.g., "ollama", "hash")
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;

    /// Declared output dimensionality
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> DocentResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> DocentResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| DocentError::Embedding("no embedding returned".to_string()))
    }
}

/// Create an embedding provider from configuration.
pub fn create_provider(settings: &EmbeddingSettings) -> DocentResult<Arc<dyn EmbeddingProvider>> {
    match settings.provider.as_str() {
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            &settings.endpoint,
            &settings.model,
            settings.dimensions,
        ))),
        "hash" => Ok(Arc::new(HashEmbedder::new(settings.dimensions))),
        other => Err(DocentError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: ollama, hash",
            other
        ))),
    }
}
