//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content kind of a source document, inferred from its file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentKind {
    /// Source code in a known language
    Code { language: Language },

    /// Markdown documentation
    Markdown,

    /// Any other recognized text file
    Other,
}

/// Programming language of a code file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Rust,
    TypeScript,
    JavaScript,
    Python,
    C,
    Cpp,
    Java,
}

impl Language {
    /// Get the tree-sitter grammar for this language, if one is bundled.
    /// Languages without a grammar fall back to generic text splitting.
    pub fn tree_sitter_language(&self) -> Option<tree_sitter::Language> {
        match self {
            Language::Go => Some(tree_sitter_go::LANGUAGE.into()),
            Language::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Language::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Language::Python => Some(tree_sitter_python::LANGUAGE.into()),
            _ => None,
        }
    }
}

impl ContentKind {
    /// Classify a file by extension. Returns `None` for extensions outside
    /// the recognized corpus set; those files are not loaded at all.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        match ext.to_lowercase().as_str() {
            "go" => Some(Self::Code {
                language: Language::Go,
            }),
            "rs" => Some(Self::Code {
                language: Language::Rust,
            }),
            "ts" | "tsx" => Some(Self::Code {
                language: Language::TypeScript,
            }),
            "js" | "jsx" => Some(Self::Code {
                language: Language::JavaScript,
            }),
            "py" => Some(Self::Code {
                language: Language::Python,
            }),
            "c" | "h" => Some(Self::Code {
                language: Language::C,
            }),
            "cpp" | "cc" | "cxx" => Some(Self::Code {
                language: Language::Cpp,
            }),
            "java" => Some(Self::Code {
                language: Language::Java,
            }),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A loaded corpus file, tagged with its path relative to the corpus root.
/// Created by the loader, consumed by the chunker, then discarded.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path relative to the corpus root, '/'-separated
    pub path: String,

    /// Raw file content
    pub text: String,

    /// Content kind inferred from the extension
    pub kind: ContentKind,
}

/// A bounded substring of a source document: the unit of embedding
/// and retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text, length bounded by the configured chunk size
    pub text: String,

    /// Relative path of the owning document
    pub source: String,
}

/// A record persisted in the vector index.
#[derive(Debug, Clone)]
pub struct IndexRecord {
    /// Embedding vector; length must equal the index dimensionality
    pub vector: Vec<f32>,

    /// Chunk text
    pub text: String,

    /// Relative path of the owning document
    pub source: String,
}

/// A chunk returned from a similarity query, in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text
    pub text: String,

    /// Relative path of the owning document; may be empty if the record
    /// was written without attribution
    pub source: String,
}
