//! Tests for the retrieval path: filtering, ordering, bounds, and error
//! propagation.

mod common;

use std::sync::Arc;

use common::{VocabEmbedder, embedded_chunk};
use ragserve_core::{
    DiskVectorStore, EmbeddingProvider, RagError, RetrievalConfig, Retriever, VectorStore,
};
use tempfile::TempDir;

const VOCAB: &[&str] = &["tax", "accounting", "deduction", "ledger", "penalt", "garden", "xyzabc"];

/// Seed a store with a small accounting-flavored corpus and return a
/// retriever over it.
async fn seeded_retriever(tmp: &TempDir, config: RetrievalConfig) -> Retriever {
    let embedder = VocabEmbedder::new(VOCAB);
    let store = DiskVectorStore::new(tmp.path());
    store.create_collection("corpus").await.unwrap();

    let chunks = vec![
        embedded_chunk(
            &embedder,
            "chunk_0",
            "Tax deductions reduce your taxable income. Tax planning matters.",
        )
        .await,
        embedded_chunk(&embedder, "chunk_1", "Accounting records every transaction in the ledger.")
            .await,
        embedded_chunk(
            &embedder,
            "chunk_2",
            "Quarterly tax deadlines trigger penalties when missed.",
        )
        .await,
        embedded_chunk(&embedder, "chunk_3", "Unrelated text about gardening.").await,
    ];
    store.upsert("corpus", &chunks).await.unwrap();

    let provider: Arc<dyn EmbeddingProvider> = Arc::new(VocabEmbedder::new(VOCAB));
    let store: Arc<dyn VectorStore> = Arc::new(DiskVectorStore::new(tmp.path()));
    Retriever::new(provider, store, config, "corpus")
}

#[tokio::test]
async fn corpus_word_query_finds_results_under_cutoff() {
    let tmp = TempDir::new().unwrap();
    let retriever = seeded_retriever(&tmp, RetrievalConfig::default()).await;

    let output = retriever.retrieve("tax").await.unwrap();

    assert!(output.num_results >= 1);
    assert_eq!(output.num_results, output.results.len());
    assert!(output.results.len() <= retriever.config().top_k);
    for result in &output.results {
        assert!(result.score <= retriever.config().max_distance);
    }
    for window in output.results.windows(2) {
        assert!(window[0].score <= window[1].score, "results not ascending by distance");
    }
    // The chunk where "tax" dominates ranks first.
    assert_eq!(output.results[0].id, "chunk_0");
}

#[tokio::test]
async fn nonsense_query_is_a_true_negative_not_an_error() {
    let tmp = TempDir::new().unwrap();
    let retriever = seeded_retriever(&tmp, RetrievalConfig::default()).await;

    // "xyzabc" is embeddable but occurs in no chunk; everything is farther
    // than the cutoff.
    let output = retriever.retrieve("xyzabc").await.unwrap();
    assert_eq!(output.num_results, 0);
    assert!(output.results.is_empty());
}

#[tokio::test]
async fn distance_cutoff_filters_unrelated_chunks() {
    let tmp = TempDir::new().unwrap();
    let retriever = seeded_retriever(&tmp, RetrievalConfig::default()).await;

    let output = retriever.retrieve("garden").await.unwrap();
    assert_eq!(output.num_results, 1);
    assert_eq!(output.results[0].id, "chunk_3");
}

#[tokio::test]
async fn top_k_bounds_the_result_count() {
    let tmp = TempDir::new().unwrap();
    let config = RetrievalConfig::builder().top_k(1).build().unwrap();
    let retriever = seeded_retriever(&tmp, config).await;

    let output = retriever.retrieve("tax").await.unwrap();
    assert_eq!(output.num_results, 1);
    assert_eq!(output.results[0].id, "chunk_0");
}

#[tokio::test]
async fn chunk_ids_are_stable_across_calls() {
    let tmp = TempDir::new().unwrap();
    let retriever = seeded_retriever(&tmp, RetrievalConfig::default()).await;

    let first = retriever.retrieve("tax").await.unwrap();
    let second = retriever.retrieve("tax").await.unwrap();

    let first_ids: Vec<&str> = first.results.iter().map(|r| r.id.as_str()).collect();
    let second_ids: Vec<&str> = second.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn missing_index_propagates_a_typed_error() {
    let tmp = TempDir::new().unwrap();
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(VocabEmbedder::new(VOCAB));
    let store: Arc<dyn VectorStore> =
        Arc::new(DiskVectorStore::new(tmp.path().join("never_ingested")));
    let retriever = Retriever::new(provider, store, RetrievalConfig::default(), "corpus");

    let err = retriever.retrieve("tax").await.unwrap_err();
    assert!(matches!(err, RagError::IndexMissing(_)), "got {err:?}");
}

#[tokio::test]
async fn scores_are_rounded_to_four_decimals() {
    let tmp = TempDir::new().unwrap();
    let retriever = seeded_retriever(&tmp, RetrievalConfig::default()).await;

    let output = retriever.retrieve("tax").await.unwrap();
    for result in &output.results {
        let rounded = (result.score * 10_000.0).round() / 10_000.0;
        assert_eq!(result.score, rounded);
    }
}

#[test]
fn config_builder_rejects_inconsistent_parameters() {
    assert!(matches!(
        RetrievalConfig::builder().chunk_size(100).chunk_overlap(100).build(),
        Err(RagError::Config(_))
    ));
    assert!(matches!(
        RetrievalConfig::builder().top_k(0).build(),
        Err(RagError::Config(_))
    ));
    assert!(matches!(
        RetrievalConfig::builder().max_distance(0.0).build(),
        Err(RagError::Config(_))
    ));
    assert!(matches!(
        RetrievalConfig::builder().max_distance(f32::NAN).build(),
        Err(RagError::Config(_))
    ));
    assert!(RetrievalConfig::builder().build().is_ok());
}
