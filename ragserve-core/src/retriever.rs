//! Query-time retrieval: embed → search → filter → map.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::RetrievalConfig;
use crate::document::{RetrievalOutput, RetrievedChunk};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Round a distance to 4 decimal places for reporting.
fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// The retrieval component: embeds a query, runs nearest-neighbor search
/// against the persisted index, and filters by the distance cutoff.
///
/// Dependencies are injected at construction (once, at process startup) and
/// shared across requests via `Arc`; the retriever itself holds no mutable
/// state. Every call re-embeds and re-searches — there is no query cache.
pub struct Retriever {
    provider: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    config: RetrievalConfig,
    collection: String,
}

impl Retriever {
    /// Create a retriever over the given provider, store, and collection.
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        config: RetrievalConfig,
        collection: impl Into<String>,
    ) -> Self {
        Self { provider, store, config, collection: collection.into() }
    }

    /// Return a reference to the retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve the chunks most similar to `query_text`.
    ///
    /// The query is embedded as-is — empty or whitespace-only text is still
    /// embedded and searched; rejecting it is the API boundary's job. Zero
    /// surviving results is a genuine empty match, returned as
    /// `num_results == 0` with an empty `results` list.
    ///
    /// # Errors
    ///
    /// Every failure propagates as a typed [`RagError`](crate::RagError):
    /// [`IndexMissing`](crate::RagError::IndexMissing) when the persisted
    /// index is absent, [`Embedding`](crate::RagError::Embedding) for
    /// embedding-service failures, [`Store`](crate::RagError::Store) for
    /// search failures. Errors are never encoded in the success payload.
    pub async fn retrieve(&self, query_text: &str) -> Result<RetrievalOutput> {
        let embedding = self.provider.embed(query_text).await?;

        let hits = self
            .store
            .search(&self.collection, &embedding, self.config.top_k)
            .await?;

        let results: Vec<RetrievedChunk> = hits
            .into_iter()
            .inspect(|hit| debug!(chunk = %hit.chunk.id, distance = hit.distance, "candidate"))
            .filter(|hit| hit.distance <= self.config.max_distance)
            .map(|hit| RetrievedChunk {
                id: hit.chunk.id,
                score: round4(hit.distance),
                text: hit.chunk.text,
            })
            .collect();

        info!(num_results = results.len(), "retrieval complete");
        Ok(RetrievalOutput { num_results: results.len(), results })
    }
}
