//! Corpus loader.
//!
//! Walks the corpus root, reads every recognized text-bearing file, and tags
//! each with its path relative to the root. Paths under docent's own data
//! directory, version-control metadata, dependency caches, and hidden files
//! are excluded before any file is read.

use docent_core::{config::DATA_DIR, DocentError, DocentResult};
use std::path::Path;
use walkdir::WalkDir;

use crate::types::{ContentKind, SourceDocument};

/// Loader configuration: which paths are excluded from the corpus.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory names that are never descended into
    pub excluded_dirs: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: vec![
                DATA_DIR.to_string(),
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "vendor".to_string(),
            ],
        }
    }
}

/// Load all recognized corpus files under `root`.
///
/// Returns documents ordered by relative path so repeated runs over an
/// unchanged tree produce identical output. A missing or unreadable root
/// fails the whole run; an unreadable individual file is skipped with a
/// warning.
pub fn load_corpus(root: &Path, config: &LoaderConfig) -> DocentResult<Vec<SourceDocument>> {
    if !root.is_dir() {
        return Err(DocentError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("corpus root is not a readable directory: {:?}", root),
        )));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // depth 0 is the root itself, which must never be filtered by name
        .filter_entry(|e| {
            e.depth() == 0 || !is_excluded(e.file_name().to_string_lossy().as_ref(), config)
        })
    {
        let entry = entry.map_err(|e| {
            DocentError::Io(std::io::Error::other(format!(
                "failed to walk corpus root {:?}: {}",
                root, e
            )))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = ContentKind::from_path(path) else {
            continue;
        };

        let relative = match path.strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        let rel_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %rel_path, bytes = text.len(), "loaded corpus file");
                documents.push(SourceDocument {
                    path: rel_path,
                    text,
                    kind,
                });
            }
            Err(e) => {
                tracing::warn!(path = %rel_path, error = %e, "skipping unreadable file");
            }
        }
    }

    tracing::info!(files = documents.len(), root = ?root, "corpus loaded");

    Ok(documents)
}

/// A directory or file name is excluded if it is one of the configured
/// excluded directories or starts with the hidden-file marker.
fn is_excluded(name: &str, config: &LoaderConfig) -> bool {
    if name.starts_with('.') && name != "." && name != ".." {
        return true;
    }
    config.excluded_dirs.iter().any(|d| d == name)
}
