//! Answer orchestration.
//!
//! Strictly sequential per request: validate → embed → retrieve → assemble
//! → build prompt → generate. Any step's failure short-circuits with a
//! typed error and no partial output; nothing is persisted, so there is
//! nothing to roll back on cancellation.

use docent_core::{DocentConfig, DocentError, DocentResult};
use docent_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

use crate::embeddings;
use crate::index::LanceIndex;
use crate::rag::context::assemble_context;
use crate::rag::prompt::PromptTemplate;
use crate::rag::retriever::Retriever;

/// The per-question answering pipeline.
///
/// Holds the read-only index handle and the stateless embedding/LLM
/// clients; safe to share across concurrent requests behind an `Arc`.
pub struct AskPipeline {
    retriever: Retriever,
    llm: Arc<dyn LlmClient>,
    template: PromptTemplate,
    model: String,
}

impl AskPipeline {
    pub fn new(
        retriever: Retriever,
        llm: Arc<dyn LlmClient>,
        template: PromptTemplate,
        model: impl Into<String>,
    ) -> Self {
        Self {
            retriever,
            llm,
            template,
            model: model.into(),
        }
    }

    /// Build the serving pipeline from configuration: open the index
    /// handle and construct the embedding and LLM clients.
    pub async fn from_config(config: &DocentConfig) -> DocentResult<Self> {
        config.validate()?;

        let embedder = embeddings::create_provider(&config.embedding)?;
        let index = LanceIndex::open(
            &config.index_path(),
            &config.table,
            embedder.dimensions(),
        )
        .await?;

        let retriever = Retriever::new(Arc::new(index), embedder, config.retrieval.top_k);
        let llm = docent_llm::create_client(&config.llm.provider, Some(&config.llm.endpoint))?;
        let template = PromptTemplate::new(&config.library, &config.language);

        Ok(Self::new(retriever, llm, template, &config.llm.model))
    }

    /// Answer a question from the indexed corpus.
    ///
    /// An empty question is rejected before any pipeline step runs.
    pub async fn answer(&self, question: &str) -> DocentResult<String> {
        if question.trim().is_empty() {
            return Err(DocentError::Validation(
                "question must be a non-empty string".to_string(),
            ));
        }

        tracing::info!(question, "retrieving context");
        let retrieved = self.retriever.retrieve(question).await?;
        let context = assemble_context(&retrieved);

        tracing::info!(passages = retrieved.len(), "generating answer");
        let request = LlmRequest::new(self.template.user(&context, question), &self.model)
            .with_system(self.template.system())
            .with_temperature(0.0);

        let response = self.llm.complete(&request).await?;

        tracing::info!("answer ready");
        Ok(response.content)
    }
}
