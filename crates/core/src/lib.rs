//! Docent core library
//!
//! Foundational utilities shared by the docent crates:
//! - Error handling (`DocentError`, `DocentResult`)
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::DocentConfig;
pub use error::{DocentError, DocentResult};
