//! Tests for the offline ingestion pipeline.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::VocabEmbedder;
use ragserve_core::{
    DiskVectorStore, EmbeddingProvider, RagError, RetrievalConfig, Retriever, VectorStore,
    ingest_file,
};
use tempfile::TempDir;

const VOCAB: &[&str] = &["tax", "accounting", "deduction", "audit"];

const SOURCE: &str = "Tax planning is a year-round discipline, not an April scramble.\n\n\
    Accounting records support every tax deduction you claim. Without records, \
    an audit becomes guesswork.\n\n\
    Deductions for equipment and travel need receipts filed as they happen.\n\n\
    A final paragraph about unrelated matters, padding the document so the \
    splitter has enough text to produce several chunks in a stable order.";

fn test_setup(tmp: &TempDir) -> (Arc<dyn EmbeddingProvider>, Arc<dyn VectorStore>) {
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(VocabEmbedder::new(VOCAB));
    let store: Arc<dyn VectorStore> = Arc::new(DiskVectorStore::new(tmp.path().join("index")));
    (provider, store)
}

fn small_chunks_config() -> RetrievalConfig {
    RetrievalConfig::builder().chunk_size(120).chunk_overlap(20).build().unwrap()
}

#[tokio::test]
async fn missing_source_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let (provider, store) = test_setup(&tmp);

    let err = ingest_file(
        &provider,
        &store,
        &RetrievalConfig::default(),
        &tmp.path().join("no_such_file.txt"),
        "corpus",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RagError::SourceMissing(_)), "got {err:?}");
}

#[tokio::test]
async fn ingestion_assigns_sequential_unique_ids() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    tokio::fs::write(&source, SOURCE).await.unwrap();
    let (provider, store) = test_setup(&tmp);

    let count = ingest_file(&provider, &store, &small_chunks_config(), &source, "corpus")
        .await
        .unwrap();
    assert!(count > 1, "expected several chunks, got {count}");

    // Pull everything back out and check the id sequence.
    let query = provider.embed("tax").await.unwrap();
    let hits = store.search("corpus", &query, count * 2).await.unwrap();
    assert_eq!(hits.len(), count);

    let ids: HashSet<String> = hits.iter().map(|h| h.chunk.id.clone()).collect();
    assert_eq!(ids.len(), count, "chunk ids are not unique");
    for i in 0..count {
        assert!(ids.contains(&format!("chunk_{i}")), "missing chunk_{i}");
    }
}

#[tokio::test]
async fn reingestion_is_stable_on_unchanged_input() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    tokio::fs::write(&source, SOURCE).await.unwrap();
    let (provider, store) = test_setup(&tmp);
    let config = small_chunks_config();

    let first = ingest_file(&provider, &store, &config, &source, "corpus").await.unwrap();
    let second = ingest_file(&provider, &store, &config, &source, "corpus").await.unwrap();
    assert_eq!(first, second);

    // The collection holds exactly one generation of chunks, not an append.
    let query = provider.embed("tax").await.unwrap();
    let hits = store.search("corpus", &query, first * 2).await.unwrap();
    assert_eq!(hits.len(), first);
}

#[tokio::test]
async fn ingested_corpus_answers_a_corpus_word_query() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    tokio::fs::write(&source, SOURCE).await.unwrap();
    let (provider, store) = test_setup(&tmp);

    ingest_file(&provider, &store, &small_chunks_config(), &source, "corpus").await.unwrap();

    let retriever =
        Retriever::new(provider, store, RetrievalConfig::default(), "corpus");
    let output = retriever.retrieve("tax").await.unwrap();

    assert!(output.num_results >= 1, "expected at least one hit for a corpus word");
    assert!(output.results.iter().any(|r| r.text.to_lowercase().contains("tax")));
}
