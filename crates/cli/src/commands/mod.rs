//! Command handlers for the docent CLI.

pub mod ingest;
pub mod serve;

pub use ingest::IngestCommand;
pub use serve::ServeCommand;
