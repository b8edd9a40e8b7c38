//! Knowledge pipeline for docent.
//!
//! Two pipelines share this crate:
//! - **Ingestion** ([`ingest::ingest`]): walk the corpus, chunk it, embed the
//!   chunks, and rebuild the vector index in one commit.
//! - **Serving** ([`rag::AskPipeline`]): embed a question, retrieve the
//!   nearest chunks, assemble an attributed context, and generate a grounded
//!   answer with the LLM.
//!
//! Both pipelines must use the same embedding provider and model; the shared
//! [`docent_core::config::EmbeddingSettings`] is the single source of truth.

pub mod chunk;
pub mod embeddings;
pub mod index;
pub mod ingest;
pub mod loader;
pub mod rag;
pub mod types;

// Re-export commonly used types
pub use ingest::IngestStats;
pub use rag::AskPipeline;
pub use types::{Chunk, ContentKind, IndexRecord, Language, RetrievedChunk, SourceDocument};
