//! Ingestion pipeline: load → chunk → embed → rebuild.
//!
//! A one-shot, single-threaded batch job run to completion per invocation.
//! Concurrent rebuilds against the same index location are not supported;
//! ingestion is an exclusive maintenance step. Every run replaces the index
//! in full, which is what keeps vector dimensionality uniform across the
//! table.

use docent_core::{DocentConfig, DocentResult};
use serde::Serialize;
use std::time::Instant;

use crate::chunk::{chunk_documents, ChunkConfig};
use crate::embeddings;
use crate::index::{LanceIndex, VectorIndex};
use crate::loader::{load_corpus, LoaderConfig};
use crate::types::IndexRecord;

/// Number of chunks embedded per progress report.
const EMBED_BATCH_SIZE: usize = 32;

/// Statistics from an ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestStats {
    /// Number of corpus files loaded
    pub documents: usize,

    /// Number of chunks written to the index
    pub chunks: usize,

    /// Total corpus bytes processed
    pub bytes: u64,

    /// Wall-clock duration in seconds
    pub duration_secs: f64,
}

/// Run the full ingestion pipeline against the configured corpus root.
pub async fn ingest(config: &DocentConfig) -> DocentResult<IngestStats> {
    let start = Instant::now();
    config.validate()?;

    tracing::info!(root = ?config.root, "ingestion starting");

    let documents = load_corpus(&config.root, &LoaderConfig::default())?;
    let bytes: u64 = documents.iter().map(|d| d.text.len() as u64).sum();

    let chunk_config = ChunkConfig {
        size: config.chunking.size,
        overlap: config.chunking.overlap,
    };
    let chunks = chunk_documents(&documents, &chunk_config)?;

    let embedder = embeddings::create_provider(&config.embedding)?;
    tracing::info!(
        provider = embedder.provider_name(),
        model = embedder.model_name(),
        dimensions = embedder.dimensions(),
        chunks = chunks.len(),
        "embedding chunks"
    );

    let mut records = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(EMBED_BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;

        for (chunk, vector) in batch.iter().zip(vectors) {
            records.push(IndexRecord {
                vector,
                text: chunk.text.clone(),
                source: chunk.source.clone(),
            });
        }

        tracing::info!(embedded = records.len(), total = chunks.len(), "progress");
    }

    let index = LanceIndex::open(
        &config.index_path(),
        &config.table,
        embedder.dimensions(),
    )
    .await?;
    let written = index.rebuild(&records).await?;

    let stats = IngestStats {
        documents: documents.len(),
        chunks: written,
        bytes,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    tracing::info!(
        documents = stats.documents,
        chunks = stats.chunks,
        bytes = stats.bytes,
        duration_secs = stats.duration_secs,
        "ingestion complete"
    );

    Ok(stats)
}
