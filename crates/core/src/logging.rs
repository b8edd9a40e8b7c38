//! Logging infrastructure for docent.
//!
//! Initializes the tracing subscriber with stderr output. stdout must stay
//! clean at all times: it carries the MCP stdio transport when serving.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{DocentError, DocentResult};

/// Initialize the tracing subscriber.
///
/// - Output goes to stderr (stdout is reserved for the MCP transport)
/// - Filtering via `RUST_LOG` or the provided level
/// - Optional ANSI color control
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> DocentResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| DocentError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| DocentError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}
