//! LanceDB-backed vector index adapter.
//!
//! The index is a single table of (vector, text, source) records. Ingestion
//! owns it exclusively and replaces it wholesale via an overwrite-mode table
//! creation: one commit, no partial state visible to readers, previous
//! contents discarded. Serving only ever queries it.
//!
//! Nearest-neighbor results come back in the engine's similarity order.
//! LanceDB does not define a tie order for equal distances; that
//! nondeterminism is accepted rather than papered over with a re-sort.

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use docent_core::{DocentError, DocentResult};
use futures::TryStreamExt;
use lancedb::database::CreateTableMode;
use lancedb::query::{ExecutableQuery, QueryBase};
use std::path::Path;
use std::sync::Arc;

use crate::types::{IndexRecord, RetrievedChunk};

/// Vector index operations used by the pipelines.
///
/// A trait seam so the serving pipeline can be exercised against an
/// in-memory stand-in in tests.
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    /// Replace the entire index with `records` in one commit.
    async fn rebuild(&self, records: &[IndexRecord]) -> DocentResult<usize>;

    /// Return the `k` nearest records to `vector`, most similar first.
    async fn query(&self, vector: &[f32], k: usize) -> DocentResult<Vec<RetrievedChunk>>;

    /// Number of records currently in the index.
    async fn count_rows(&self) -> DocentResult<usize>;
}

/// LanceDB index handle.
///
/// Constructed explicitly and passed into the ingestion writer and the
/// retriever; connection lifetime is scoped to the owning process phase.
pub struct LanceIndex {
    conn: lancedb::Connection,
    table_name: String,
    dimensions: usize,
}

impl LanceIndex {
    /// Connect to (creating if absent) the LanceDB database at `db_path`.
    pub async fn open(db_path: &Path, table_name: &str, dimensions: usize) -> DocentResult<Self> {
        std::fs::create_dir_all(db_path).map_err(|e| {
            DocentError::Index(format!("failed to create index directory: {}", e))
        })?;

        let uri = db_path.to_string_lossy().to_string();
        let conn = lancedb::connect(&uri)
            .execute()
            .await
            .map_err(|e| DocentError::Index(format!("failed to connect to LanceDB: {}", e)))?;

        tracing::debug!(path = ?db_path, table = table_name, "opened LanceDB index");

        Ok(Self {
            conn,
            table_name: table_name.to_string(),
            dimensions,
        })
    }

    /// Arrow schema for the index table: vector, text, source.
    fn schema(&self) -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, true)),
                    self.dimensions as i32,
                ),
                false,
            ),
            Field::new("text", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, false),
        ]))
    }

    /// Convert records into a single Arrow RecordBatch.
    fn records_to_batch(&self, records: &[IndexRecord]) -> DocentResult<RecordBatch> {
        let schema = self.schema();

        if records.is_empty() {
            return Ok(RecordBatch::new_empty(schema));
        }

        let mut values = Vec::with_capacity(records.len() * self.dimensions);
        for record in records {
            values.extend_from_slice(&record.vector);
        }

        let vector_array = FixedSizeListArray::new(
            Arc::new(Field::new("item", DataType::Float32, true)),
            self.dimensions as i32,
            Arc::new(Float32Array::from(values)),
            None,
        );
        let text_array =
            StringArray::from(records.iter().map(|r| r.text.as_str()).collect::<Vec<_>>());
        let source_array =
            StringArray::from(records.iter().map(|r| r.source.as_str()).collect::<Vec<_>>());

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(vector_array),
                Arc::new(text_array),
                Arc::new(source_array),
            ],
        )
        .map_err(|e| DocentError::Index(format!("failed to build record batch: {}", e)))
    }

    fn batch_to_chunks(batch: &RecordBatch, out: &mut Vec<RetrievedChunk>) -> DocentResult<()> {
        let texts = batch
            .column_by_name("text")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| DocentError::Index("invalid text column".to_string()))?;
        let sources = batch
            .column_by_name("source")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| DocentError::Index("invalid source column".to_string()))?;

        for row in 0..batch.num_rows() {
            out.push(RetrievedChunk {
                text: texts.value(row).to_string(),
                source: sources.value(row).to_string(),
            });
        }

        Ok(())
    }

    async fn table(&self) -> DocentResult<lancedb::Table> {
        self.conn
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(|e| DocentError::Index(format!("failed to open index table: {}", e)))
    }
}

#[async_trait::async_trait]
impl VectorIndex for LanceIndex {
    async fn rebuild(&self, records: &[IndexRecord]) -> DocentResult<usize> {
        // Dimensionality check before any write: a mismatched rebuild would
        // corrupt similarity search for the whole table.
        for record in records {
            if record.vector.len() != self.dimensions {
                return Err(DocentError::Config(format!(
                    "embedding dimensionality mismatch for {}: expected {}, got {}",
                    record.source,
                    self.dimensions,
                    record.vector.len()
                )));
            }
        }

        let batch = self.records_to_batch(records)?;
        let schema = batch.schema();

        self.conn
            .create_table(
                &self.table_name,
                RecordBatchIterator::new(vec![Ok(batch)], schema),
            )
            .mode(CreateTableMode::Overwrite)
            .execute()
            .await
            .map_err(|e| DocentError::Index(format!("failed to rebuild index table: {}", e)))?;

        tracing::info!(
            table = %self.table_name,
            records = records.len(),
            "index rebuilt"
        );

        Ok(records.len())
    }

    async fn query(&self, vector: &[f32], k: usize) -> DocentResult<Vec<RetrievedChunk>> {
        if vector.len() != self.dimensions {
            return Err(DocentError::Config(format!(
                "query embedding dimensionality mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }

        let table = self.table().await?;

        let batches = table
            .query()
            .nearest_to(vector.to_vec())
            .map_err(|e| DocentError::Index(format!("failed to build query: {}", e)))?
            .limit(k)
            .execute()
            .await
            .map_err(|e| DocentError::Index(format!("failed to execute query: {}", e)))?
            .try_collect::<Vec<_>>()
            .await
            .map_err(|e| DocentError::Index(format!("failed to collect results: {}", e)))?;

        let mut chunks = Vec::new();
        for batch in &batches {
            Self::batch_to_chunks(batch, &mut chunks)?;
        }

        tracing::debug!(retrieved = chunks.len(), k, "index query complete");

        Ok(chunks)
    }

    async fn count_rows(&self) -> DocentResult<usize> {
        let table = self.table().await?;
        table
            .count_rows(None)
            .await
            .map_err(|e| DocentError::Index(format!("failed to count rows: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(vector: Vec<f32>, text: &str, source: &str) -> IndexRecord {
        IndexRecord {
            vector,
            text: text.to_string(),
            source: source.to_string(),
        }
    }

    fn unit(dim: usize, hot: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[hot] = 1.0;
        v
    }

    #[tokio::test]
    async fn test_rebuild_and_query() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();

        let records = vec![
            record(unit(4, 0), "alpha", "a.md"),
            record(unit(4, 1), "beta", "b.md"),
            record(unit(4, 2), "gamma", "c.md"),
        ];
        let written = index.rebuild(&records).await.unwrap();
        assert_eq!(written, 3);
        assert_eq!(index.count_rows().await.unwrap(), 3);

        let results = index.query(&unit(4, 1), 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "beta");
        assert_eq!(results[0].source, "b.md");
    }

    #[tokio::test]
    async fn test_rebuild_overwrites_previous_contents() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();

        let first = vec![
            record(unit(4, 0), "one", "a.md"),
            record(unit(4, 1), "two", "b.md"),
            record(unit(4, 2), "three", "c.md"),
        ];
        index.rebuild(&first).await.unwrap();
        assert_eq!(index.count_rows().await.unwrap(), 3);

        let second = vec![record(unit(4, 3), "new", "d.md")];
        index.rebuild(&second).await.unwrap();
        // No accumulation: run 2 fully replaces run 1
        assert_eq!(index.count_rows().await.unwrap(), 1);

        let results = index.query(&unit(4, 3), 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "d.md");
    }

    #[tokio::test]
    async fn test_dimensionality_mismatch_aborts_before_write() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();

        index
            .rebuild(&[record(unit(4, 0), "ok", "a.md")])
            .await
            .unwrap();

        let bad = vec![
            record(unit(4, 1), "fine", "b.md"),
            record(vec![1.0, 0.0], "wrong dims", "c.md"),
        ];
        let err = index.rebuild(&bad).await.unwrap_err();
        assert!(matches!(err, DocentError::Config(_)));

        // Previous index is untouched
        assert_eq!(index.count_rows().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_query_dimensionality_checked() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();
        index
            .rebuild(&[record(unit(4, 0), "ok", "a.md")])
            .await
            .unwrap();

        let err = index.query(&[1.0, 0.0], 3).await.unwrap_err();
        assert!(matches!(err, DocentError::Config(_)));
    }

    #[tokio::test]
    async fn test_rebuild_with_empty_corpus() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();

        index.rebuild(&[]).await.unwrap();
        assert_eq!(index.count_rows().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_retrieval_determinism() {
        let temp = TempDir::new().unwrap();
        let index = LanceIndex::open(temp.path(), "vectors", 4).await.unwrap();

        let records = vec![
            record(vec![0.9, 0.1, 0.0, 0.0], "close", "a.md"),
            record(vec![0.1, 0.9, 0.0, 0.0], "far", "b.md"),
            record(vec![0.8, 0.2, 0.0, 0.0], "closer", "c.md"),
        ];
        index.rebuild(&records).await.unwrap();

        let first = index.query(&unit(4, 0), 3).await.unwrap();
        let second = index.query(&unit(4, 0), 3).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].source, "a.md");
    }
}
