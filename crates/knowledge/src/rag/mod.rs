//! Retrieval-augmented answering.
//!
//! Per-request pipeline: embed the question, retrieve the nearest chunks,
//! assemble an attributed context block, fill the fixed prompt template,
//! and generate the answer at temperature zero.

pub mod ask;
pub mod context;
pub mod prompt;
pub mod retriever;

pub use ask::AskPipeline;
pub use context::assemble_context;
pub use prompt::{PromptTemplate, NOT_FOUND_PHRASE};
pub use retriever::Retriever;
