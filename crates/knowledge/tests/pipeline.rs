//! End-to-end ingestion and retrieval tests using the deterministic
//! hash embedder and a real LanceDB index in a temp directory.

use docent_core::config::EmbeddingSettings;
use docent_core::DocentConfig;
use docent_knowledge::embeddings;
use docent_knowledge::index::{LanceIndex, VectorIndex};
use docent_knowledge::ingest::ingest;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DIMS: usize = 128;

fn test_config(root: &Path) -> DocentConfig {
    let mut config = DocentConfig::default();
    config.root = root.to_path_buf();
    config.embedding = EmbeddingSettings {
        provider: "hash".to_string(),
        model: "trigram-hash".to_string(),
        dimensions: DIMS,
        endpoint: String::new(),
    };
    config
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn go_source(functions: usize) -> String {
    let mut src = String::from("package weather\n\n");
    for i in 0..functions {
        src.push_str(&format!(
            "func Forecast{i}(city string) string {{\n\
             \treturn fmt.Sprintf(\"forecast %d for %s\", {i}, city)\n\
             }}\n\n"
        ));
    }
    src
}

async fn open_index(config: &DocentConfig) -> LanceIndex {
    LanceIndex::open(&config.index_path(), &config.table, DIMS)
        .await
        .unwrap()
}

async fn all_sources(config: &DocentConfig) -> BTreeSet<String> {
    let index = open_index(config).await;
    let embedder = embeddings::create_provider(&config.embedding).unwrap();
    let probe = embedder.embed("probe").await.unwrap();
    index
        .query(&probe, 10_000)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.source)
        .collect()
}

#[tokio::test]
async fn ingest_small_corpus() {
    let temp = TempDir::new().unwrap();
    let readme = "This library fetches weather data. Set the API key via the \
                  WEATHER_API_KEY environment variable before calling the client. \
                  See the examples for details on forecast queries."
        .to_string();
    write(temp.path(), "README.md", &readme);
    let go = go_source(30);
    assert!(go.len() >= 3000);
    write(temp.path(), "weather.go", &go);

    let config = test_config(temp.path());
    let stats = ingest(&config).await.unwrap();

    assert_eq!(stats.documents, 2);
    // 200-char README fits one chunk; the 3000+ char Go file needs >= 3
    assert!(stats.chunks >= 4);

    let index = open_index(&config).await;
    assert_eq!(index.count_rows().await.unwrap(), stats.chunks);

    let sources = all_sources(&config).await;
    assert_eq!(
        sources,
        BTreeSet::from(["README.md".to_string(), "weather.go".to_string()])
    );
}

#[tokio::test]
async fn ingest_is_idempotent() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "README.md", &"api key notes ".repeat(200));
    write(temp.path(), "weather.go", &go_source(20));

    let config = test_config(temp.path());

    let first = ingest(&config).await.unwrap();
    let first_records = collect_records(&config).await;

    let second = ingest(&config).await.unwrap();
    let second_records = collect_records(&config).await;

    assert_eq!(first.chunks, second.chunks);
    assert_eq!(first_records, second_records);
}

async fn collect_records(config: &DocentConfig) -> BTreeSet<(String, String)> {
    let index = open_index(config).await;
    let embedder = embeddings::create_provider(&config.embedding).unwrap();
    let probe = embedder.embed("probe").await.unwrap();
    index
        .query(&probe, 10_000)
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.source, c.text))
        .collect()
}

#[tokio::test]
async fn second_ingest_replaces_first_corpus() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "README.md", &"first corpus ".repeat(300));
    write(temp.path(), "weather.go", &go_source(20));

    let config = test_config(temp.path());
    let first = ingest(&config).await.unwrap();
    assert!(first.chunks > 1);

    // Shrink the corpus and re-ingest
    fs::remove_file(temp.path().join("weather.go")).unwrap();
    write(temp.path(), "README.md", "tiny corpus now");

    let second = ingest(&config).await.unwrap();
    assert_eq!(second.chunks, 1);

    let index = open_index(&config).await;
    assert_eq!(index.count_rows().await.unwrap(), 1);
}

#[tokio::test]
async fn excluded_paths_never_reach_the_index() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "weather.go", &go_source(5));
    write(temp.path(), ".git/HEAD.md", "ref: refs/heads/main");
    write(temp.path(), "node_modules/pkg/index.js", "module.exports = 1;");
    write(temp.path(), ".docent/notes.md", "agent internals");
    write(temp.path(), ".env.md", "secrets");

    let config = test_config(temp.path());
    ingest(&config).await.unwrap();

    let sources = all_sources(&config).await;
    assert_eq!(sources, BTreeSet::from(["weather.go".to_string()]));
}

#[tokio::test]
async fn relevant_chunk_is_retrieved_for_matching_query() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "README.md",
        "To authenticate, set the API key with the WEATHER_API_KEY environment variable.",
    );
    write(
        temp.path(),
        "CHANGELOG.md",
        "Version history: refactored internal caching and forecast parsing.",
    );

    let config = test_config(temp.path());
    ingest(&config).await.unwrap();

    let index = open_index(&config).await;
    let embedder = embeddings::create_provider(&config.embedding).unwrap();
    let query = embedder.embed("How do I set the API key?").await.unwrap();

    let results = index.query(&query, 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "README.md");
    assert!(results[0].text.contains("API key"));
}

#[tokio::test]
async fn index_directory_created_on_first_run() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "README.md", "a corpus");

    let config = test_config(temp.path());
    assert!(!config.index_path().exists());

    ingest(&config).await.unwrap();
    assert!(config.index_path().exists());
}

#[tokio::test]
async fn missing_root_fails_ingestion() {
    let config = test_config(Path::new("/nonexistent/docent-corpus"));
    assert!(ingest(&config).await.is_err());
}
