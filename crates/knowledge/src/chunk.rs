//! Chunker: splits loaded documents into bounded, overlapping segments.
//!
//! The splitting strategy is selected by content kind. Code files with a
//! bundled tree-sitter grammar are split at syntactic boundaries first
//! (functions, blocks) with raw-length breaks as a last resort; everything
//! else goes through the generic recursive splitter, which prefers
//! paragraph, then line, then word boundaries. Both strategies share the
//! same size/overlap configuration and are deterministic for identical
//! input.

use docent_core::{DocentError, DocentResult};
use text_splitter::{Characters, ChunkConfig as SplitterConfig, CodeSplitter, TextSplitter};

use crate::types::{Chunk, ContentKind, SourceDocument};

/// Chunk size and overlap in characters.
#[derive(Debug, Clone, Copy)]
pub struct ChunkConfig {
    /// Maximum chunk length
    pub size: usize,

    /// Overlap between consecutive chunks of the same document
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkConfig {
    /// Validate the size/overlap relationship. Overlap must be strictly
    /// smaller than the chunk size or splitting cannot make progress.
    pub fn validate(&self) -> DocentResult<()> {
        if self.size == 0 {
            return Err(DocentError::Config("chunk size must be positive".into()));
        }
        if self.overlap >= self.size {
            return Err(DocentError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.size
            )));
        }
        Ok(())
    }

    fn splitter_config(&self) -> DocentResult<SplitterConfig<Characters>> {
        SplitterConfig::new(self.size)
            .with_overlap(self.overlap)
            .map_err(|e| DocentError::Config(format!("invalid chunk configuration: {}", e)))
    }
}

/// Split all documents into chunks, preserving document order.
pub fn chunk_documents(
    documents: &[SourceDocument],
    config: &ChunkConfig,
) -> DocentResult<Vec<Chunk>> {
    config.validate()?;

    let mut chunks = Vec::new();
    for document in documents {
        let before = chunks.len();
        chunks.extend(chunk_document(document, config)?);
        tracing::debug!(
            source = %document.path,
            chunks = chunks.len() - before,
            "document chunked"
        );
    }

    tracing::info!(
        documents = documents.len(),
        chunks = chunks.len(),
        "chunking complete"
    );

    Ok(chunks)
}

/// Split a single document with the kind-appropriate splitter.
fn chunk_document(document: &SourceDocument, config: &ChunkConfig) -> DocentResult<Vec<Chunk>> {
    let pieces: Vec<String> = match &document.kind {
        ContentKind::Code { language } => match language.tree_sitter_language() {
            Some(grammar) => {
                let splitter = CodeSplitter::new(grammar, config.splitter_config()?)
                    .map_err(|e| {
                        DocentError::Config(format!(
                            "failed to build code splitter for {}: {}",
                            document.path, e
                        ))
                    })?;
                splitter.chunks(&document.text).map(str::to_string).collect()
            }
            // No grammar bundled for this language; generic split
            None => text_split(&document.text, config)?,
        },
        ContentKind::Markdown | ContentKind::Other => text_split(&document.text, config)?,
    };

    Ok(pieces
        .into_iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| Chunk {
            text,
            source: document.path.clone(),
        })
        .collect())
}

fn text_split(text: &str, config: &ChunkConfig) -> DocentResult<Vec<String>> {
    let splitter = TextSplitter::new(config.splitter_config()?);
    Ok(splitter.chunks(text).map(str::to_string).collect())
}
