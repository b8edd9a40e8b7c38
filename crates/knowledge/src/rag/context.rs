//! Context assembler: renders retrieved chunks into one attributed block.
//!
//! Every passage carries an explicit source label so the generator can cite
//! files and a human auditor can verify groundedness. A record without a
//! source is labeled "unknown" rather than losing its attribution.

use crate::types::RetrievedChunk;

/// Source label used when a record carries no source path.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Render retrieved passages in retrieval order, each wrapped with a
/// file-name delimiter, separated by blank lines.
pub fn assemble_context(chunks: &[RetrievedChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| {
            let source = if chunk.source.trim().is_empty() {
                UNKNOWN_SOURCE
            } else {
                chunk.source.as_str()
            };
            format!("--- [File: {}] ---\n{}\n", source, chunk.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, source: &str) -> RetrievedChunk {
        RetrievedChunk {
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_every_passage_is_labeled() {
        let context = assemble_context(&[
            chunk("the api key lives in the env", "README.md"),
            chunk("func Forecast(city string)", "weather.go"),
        ]);

        assert!(context.contains("--- [File: README.md] ---"));
        assert!(context.contains("--- [File: weather.go] ---"));
        assert!(context.contains("the api key lives in the env"));
        assert!(context.contains("func Forecast(city string)"));
    }

    #[test]
    fn test_passages_separated_by_blank_line() {
        let context = assemble_context(&[chunk("first", "a.md"), chunk("second", "b.md")]);
        assert!(context.contains("first\n\n--- [File: b.md] ---"));
    }

    #[test]
    fn test_missing_source_marked_unknown() {
        let context = assemble_context(&[chunk("orphan passage", "  ")]);
        assert!(context.contains("--- [File: unknown] ---"));
    }

    #[test]
    fn test_retrieval_order_preserved() {
        let context = assemble_context(&[chunk("z", "z.md"), chunk("a", "a.md")]);
        let z_pos = context.find("z.md").unwrap();
        let a_pos = context.find("a.md").unwrap();
        assert!(z_pos < a_pos);
    }

    #[test]
    fn test_empty_retrieval_yields_empty_context() {
        assert_eq!(assemble_context(&[]), "");
    }
}
