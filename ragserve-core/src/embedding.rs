//! The embedding seam between this crate and external embedding models.

use async_trait::async_trait;

use crate::error::Result;

/// Turns text into fixed-length vectors via some embedding backend.
///
/// This is one of the two injection points of the crate (the other being
/// [`VectorStore`](crate::VectorStore)): production code hands the
/// retriever and the ingestion pipeline an `Arc<dyn EmbeddingProvider>`
/// built once in `main`, and tests substitute a deterministic fake. Because
/// construction happens up front, nothing in the request path ever
/// initializes a provider lazily.
///
/// # Example
///
/// ```rust,ignore
/// use ragserve_core::EmbeddingProvider;
///
/// let provider = OpenAiEmbeddings::from_env()?;
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, preserving input order.
    ///
    /// By default this just loops over [`embed`](EmbeddingProvider::embed),
    /// one request per text. A backend with a real batch endpoint (the
    /// OpenAI API takes the whole batch in one call) should override it —
    /// ingestion embeds every chunk of the document through this method.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The length of every vector this provider produces.
    fn dimensions(&self) -> usize;
}
