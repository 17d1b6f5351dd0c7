//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for vector embeddings with nearest-neighbor search.
///
/// Implementations manage named collections of [`Chunk`]s. The retrieval
/// path uses only [`search`](VectorStore::search); the ingestion pipeline
/// uses the collection and upsert operations.
///
/// # Example
///
/// ```rust,ignore
/// use ragserve_core::{VectorStore, DiskVectorStore};
///
/// let store = DiskVectorStore::new("index_db");
/// store.create_collection("corpus").await?;
/// store.upsert("corpus", &chunks).await?;
/// let hits = store.search("corpus", &query_embedding, 3).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection. No-op if it already exists.
    async fn create_collection(&self, name: &str) -> Result<()>;

    /// Delete a named collection and all its data.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Upsert chunks into a collection. Chunks must have embeddings set.
    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` nearest chunks to the given embedding.
    ///
    /// Returns results ordered by ascending distance (nearest first).
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
