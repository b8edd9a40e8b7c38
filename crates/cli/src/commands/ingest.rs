//! Ingest command handler.
//!
//! Rebuilds the vector index from the configured library tree.

use clap::Args;
use docent_core::{DocentConfig, DocentResult};

/// Scan the library tree and rebuild the vector index
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Output the ingestion stats as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    pub async fn execute(&self, config: &DocentConfig) -> DocentResult<()> {
        tracing::info!(
            root = %config.root.display(),
            library = %config.library,
            "starting ingestion"
        );

        let stats = docent_knowledge::ingest::ingest(config).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!(
                "Indexed {} chunks from {} documents ({} bytes) in {:.1}s",
                stats.chunks, stats.documents, stats.bytes, stats.duration_secs
            );
            println!("Index written to {}", config.index_path().display());
        }

        Ok(())
    }
}
