use std::sync::Arc;

use ragserve_core::{
    DiskVectorStore, EmbeddingProvider, OpenAiEmbeddings, RetrievalConfig, Retriever, VectorStore,
};
use ragserve_server::{AppPaths, AppState, ServerConfig, run_server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let paths = AppPaths::from_env();

    // Advisory only — the server still starts without an index; queries
    // fail with a typed error until ingestion has run.
    if paths.index_dir.exists() {
        info!(index_dir = %paths.index_dir.display(), "vector index found, ready for queries");
    } else {
        warn!(
            index_dir = %paths.index_dir.display(),
            "vector index not found; run the ingest binary before queries will work"
        );
    }

    let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddings::from_env()?);
    let store: Arc<dyn VectorStore> = Arc::new(DiskVectorStore::new(&paths.index_dir));
    let retriever = Arc::new(Retriever::new(
        provider,
        store,
        RetrievalConfig::default(),
        paths.collection.clone(),
    ));

    let state = AppState { retriever, static_dir: paths.static_dir };
    run_server(config, state).await
}
