//! Retriever: fixed top-k similarity query over the vector index.

use docent_core::DocentResult;
use std::sync::Arc;

use crate::embeddings::EmbeddingProvider;
use crate::index::VectorIndex;
use crate::types::RetrievedChunk;

/// Wraps the vector index with a fixed top-k query.
///
/// The question is embedded with the same provider used at ingestion, the
/// index is queried, and results come back in the engine's similarity
/// order. No re-ranking and no relevance cutoff: what the prompt does with
/// thin context is the prompt contract's problem.
pub struct Retriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    /// Retrieve the top-k chunks most similar to `question`.
    pub async fn retrieve(&self, question: &str) -> DocentResult<Vec<RetrievedChunk>> {
        let embedding = self.embedder.embed(question).await?;
        let chunks = self.index.query(&embedding, self.top_k).await?;

        tracing::debug!(retrieved = chunks.len(), top_k = self.top_k, "retrieval complete");

        Ok(chunks)
    }
}
