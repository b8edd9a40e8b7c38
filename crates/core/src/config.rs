//! Configuration management for docent.
//!
//! Configuration is merged from multiple sources, later ones winning:
//! - Built-in defaults
//! - Config file (`<root>/.docent/config.yaml` or `--config`)
//! - Environment variables
//! - Command-line flags
//!
//! All settings are validated once at startup via [`DocentConfig::validate`];
//! invalid combinations (e.g. chunk overlap >= chunk size) are configuration
//! errors and never silently coerced.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DocentError, DocentResult};

/// Directory under the corpus root that holds docent's own state
/// (index, config). Always excluded from ingestion.
pub const DATA_DIR: &str = ".docent";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocentConfig {
    /// Root directory of the library's source tree (the corpus)
    pub root: PathBuf,

    /// Optional config file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,

    /// Name of the library this agent answers questions about.
    /// Also determines the MCP tool name (`ask_<library>`).
    pub library: String,

    /// Language the library is written in; code samples in answers
    /// are constrained to this language.
    pub language: String,

    /// Name of the vector index table
    pub table: String,

    /// Chunking settings
    pub chunking: ChunkingSettings,

    /// Retrieval settings
    pub retrieval: RetrievalSettings,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,

    /// Answer-generation LLM settings
    pub llm: LlmSettings,

    /// Log level override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

/// Chunk size and overlap, in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSettings {
    #[serde(default = "default_chunk_size")]
    pub size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub overlap: usize,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            overlap: default_chunk_overlap(),
        }
    }
}

/// Serving-side retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Number of nearest-neighbor chunks fed into the prompt.
    /// Observed useful range is 4-6; more context, longer prompts.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    6
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Embedding provider settings.
///
/// The same provider and model must be used at ingestion and query time;
/// this struct is the single source of truth for both pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider identifier ("ollama" or "hash")
    pub provider: String,

    /// Embedding model name
    pub model: String,

    /// Declared output dimensionality of the model
    pub dimensions: usize,

    /// Provider endpoint (for HTTP-backed providers)
    pub endpoint: String,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            endpoint: "http://localhost:11434".to_string(),
        }
    }
}

/// Answer-generation LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider identifier ("ollama")
    pub provider: String,

    /// Chat/completion model name
    pub model: String,

    /// Provider endpoint
    pub endpoint: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "gemma3".to_string(),
            endpoint: "http://localhost:11434".to_string(),
        }
    }
}

/// Config file structure (all fields optional, merged over defaults).
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    library: Option<String>,
    language: Option<String>,
    table: Option<String>,
    chunking: Option<ChunkingSettings>,
    retrieval: Option<RetrievalSettings>,
    embedding: Option<EmbeddingSettings>,
    llm: Option<LlmSettings>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for DocentConfig {
    fn default() -> Self {
        Self {
            root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            library: "weatherlib".to_string(),
            language: "Go".to_string(),
            table: "vectors".to_string(),
            chunking: ChunkingSettings::default(),
            retrieval: RetrievalSettings::default(),
            embedding: EmbeddingSettings::default(),
            llm: LlmSettings::default(),
            log_level: None,
            no_color: false,
        }
    }
}

impl DocentConfig {
    /// Load configuration from environment variables and the config file.
    ///
    /// Environment variables:
    /// - `DOCENT_ROOT`: corpus root directory
    /// - `DOCENT_CONFIG`: path to config file
    /// - `DOCENT_LIBRARY`: library name
    /// - `OLLAMA_BASE_URL`: override both embedding and LLM endpoints
    /// - `RUST_LOG`: log level
    /// - `NO_COLOR`: disable colored output
    pub fn load() -> DocentResult<Self> {
        Self::load_with(None, None)
    }

    /// Load configuration with explicit root and config-file paths taking
    /// precedence over the environment. The root must be known before the
    /// config file is resolved (the default file lives under the root).
    pub fn load_with(root: Option<&Path>, config_file: Option<&Path>) -> DocentResult<Self> {
        let mut config = Self::default();

        if let Some(root) = root {
            config.root = root.to_path_buf();
        } else if let Ok(root) = std::env::var("DOCENT_ROOT") {
            config.root = PathBuf::from(root);
        }

        if let Some(config_file) = config_file {
            config.config_file = Some(config_file.to_path_buf());
        } else if let Ok(config_file) = std::env::var("DOCENT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.root.join(DATA_DIR).join("config.yaml"),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        }

        // Environment variables override the config file
        if let Ok(library) = std::env::var("DOCENT_LIBRARY") {
            config.library = library;
        }

        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            config.embedding.endpoint = url.clone();
            config.llm.endpoint = url;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML config file into this config.
    fn merge_yaml(&mut self, path: &Path) -> DocentResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DocentError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            DocentError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(library) = file.library {
            self.library = library;
        }
        if let Some(language) = file.language {
            self.language = language;
        }
        if let Some(table) = file.table {
            self.table = table;
        }
        if let Some(chunking) = file.chunking {
            self.chunking = chunking;
        }
        if let Some(retrieval) = file.retrieval {
            self.retrieval = retrieval;
        }
        if let Some(embedding) = file.embedding {
            self.embedding = embedding;
        }
        if let Some(llm) = file.llm {
            self.llm = llm;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides, giving precedence to command-line flags.
    pub fn with_overrides(
        mut self,
        root: Option<PathBuf>,
        library: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        if let Some(library) = library {
            self.library = library;
        }
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }
        if verbose {
            self.log_level = Some("debug".to_string());
        }
        if no_color {
            self.no_color = true;
        }
        self
    }

    /// Validate the configuration. Fatal at startup on error.
    pub fn validate(&self) -> DocentResult<()> {
        if self.library.trim().is_empty() {
            return Err(DocentError::Config("library name must not be empty".into()));
        }

        if self.chunking.size == 0 {
            return Err(DocentError::Config("chunk size must be positive".into()));
        }

        if self.chunking.overlap >= self.chunking.size {
            return Err(DocentError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunking.overlap, self.chunking.size
            )));
        }

        if self.retrieval.top_k == 0 {
            return Err(DocentError::Config("top_k must be at least 1".into()));
        }

        if self.embedding.dimensions == 0 {
            return Err(DocentError::Config(
                "embedding dimensions must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Directory where the vector index is persisted.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(DATA_DIR).join("index")
    }

    /// The MCP tool name exposed by the serving endpoint.
    pub fn tool_name(&self) -> String {
        format!("ask_{}", self.library)
    }
}
