//! Retrieval smoke check: runs a fixed battery of probe queries against the
//! persisted index and prints what comes back. Useful after ingestion to
//! eyeball chunk quality and the distance cutoff.

use std::sync::Arc;

use ragserve_core::{
    DiskVectorStore, EmbeddingProvider, OpenAiEmbeddings, RetrievalConfig, Retriever, VectorStore,
};
use ragserve_server::AppPaths;

const PROBES: &[(&str, &str)] = &[
    ("tax", "single word, should find results"),
    ("accounting", "single word, should find results"),
    ("How to save money on taxes?", "multi-word query"),
    ("deductions", "common term"),
    ("", "empty query"),
    ("   ", "only spaces"),
    ("xyzabc", "nonsense word"),
    ("!@#$%", "special characters"),
    ("123456", "numbers only"),
    ("savings", "word not in dataset"),
];

/// First `n` characters of a chunk for display.
fn preview(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let paths = AppPaths::from_env();
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddings::from_env()?);
    let store: Arc<dyn VectorStore> = Arc::new(DiskVectorStore::new(&paths.index_dir));
    let retriever =
        Retriever::new(provider, store, RetrievalConfig::default(), paths.collection.clone());

    for &(query, description) in PROBES {
        println!("{}", "=".repeat(72));
        println!("query: {query:?} ({description})");

        // The API boundary rejects empty queries; mirror that here instead
        // of embedding them.
        if query.trim().is_empty() {
            println!("  skipped: empty after trimming");
            continue;
        }

        match retriever.retrieve(query).await {
            Ok(output) => {
                println!("  {} chunk(s) under the distance cutoff", output.num_results);
                for (i, chunk) in output.results.iter().enumerate() {
                    println!("  [{}] {} distance={}", i + 1, chunk.id, chunk.score);
                    println!("      {}...", preview(&chunk.text, 100));
                }
            }
            Err(e) => println!("  error: {e}"),
        }
    }

    println!("{}", "=".repeat(72));
    Ok(())
}
