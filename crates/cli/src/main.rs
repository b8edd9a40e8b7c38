//! Docent CLI
//!
//! Entry point for the `docent` command-line tool: `ingest` builds the
//! vector index for a library tree, `serve` answers questions about it
//! over MCP stdio.

mod commands;

use clap::{Parser, Subcommand};
use commands::{IngestCommand, ServeCommand};
use docent_core::{logging, DocentConfig, DocentResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Index a library and answer questions about it over MCP
#[derive(Parser, Debug)]
#[command(name = "docent")]
#[command(about = "Index a library and answer questions about it over MCP", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the library tree (default: current directory)
    #[arg(short, long, global = true, env = "DOCENT_ROOT")]
    root: Option<PathBuf>,

    /// Path to the config file (default: `<root>/.docent/config.yaml`)
    #[arg(short, long, global = true, env = "DOCENT_CONFIG")]
    config: Option<PathBuf>,

    /// Library name, used for the `ask_<library>` tool
    #[arg(short, long, global = true, env = "DOCENT_LIBRARY")]
    library: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the library tree and rebuild the vector index
    Ingest(IngestCommand),

    /// Serve the `ask_<library>` tool over MCP stdio
    Serve(ServeCommand),
}

async fn run(cli: Cli) -> DocentResult<()> {
    let config = DocentConfig::load_with(cli.root.as_deref(), cli.config.as_deref())?
        .with_overrides(None, cli.library, cli.log_level, cli.verbose, cli.no_color);

    // Logging goes to stderr; stdout is reserved for the MCP transport.
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::debug!(root = %config.root.display(), library = %config.library, "configuration loaded");

    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::Serve(_) => "serve",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Serve(cmd) => cmd.execute(&config).await,
    }
}


#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
