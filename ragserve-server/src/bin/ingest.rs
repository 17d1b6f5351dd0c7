//! Offline ingestion: load the configured source file, chunk, embed, and
//! persist the vector index. Run this before starting the server.

use std::sync::Arc;

use ragserve_core::{
    DiskVectorStore, EmbeddingProvider, OpenAiEmbeddings, RetrievalConfig, VectorStore,
    ingest_file,
};
use ragserve_server::AppPaths;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let paths = AppPaths::from_env();
    let config = RetrievalConfig::default();

    let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddings::from_env()?);
    let store: Arc<dyn VectorStore> = Arc::new(DiskVectorStore::new(&paths.index_dir));

    let count = ingest_file(&provider, &store, &config, &paths.data_file, &paths.collection).await?;

    info!(
        chunk_count = count,
        index_dir = %paths.index_dir.display(),
        collection = %paths.collection,
        "ingestion finished"
    );
    Ok(())
}
