//! Offline ingestion pipeline: load → split → embed → persist.
//!
//! Ingestion runs once, outside the request path, and feeds the persisted
//! index that retrieval reads. Every failure is fatal and reported to the
//! operator; there is no retry or partial-ingestion recovery.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::chunking::{Chunker, RecursiveChunker};
use crate::config::RetrievalConfig;
use crate::document::Chunk;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Ingest a single text file into a named collection.
///
/// Steps:
/// 1. Read the source file as UTF-8 text.
/// 2. Split it with [`RecursiveChunker`] using the configured size/overlap.
/// 3. Assign each chunk the id `chunk_<i>` in split order.
/// 4. Embed all chunk texts in one batch.
/// 5. Recreate the collection (delete, create, upsert) so a re-run replaces
///    any previous contents.
///
/// Returns the number of chunks written. Re-running on unchanged input and
/// parameters produces the same chunk count and id sequence.
///
/// # Errors
///
/// - [`RagError::SourceMissing`] if the file does not exist.
/// - [`RagError::SourceRead`] if the file cannot be read.
/// - [`RagError::Embedding`] if the embedding service fails.
/// - [`RagError::Store`] if persisting fails.
pub async fn ingest_file(
    provider: &Arc<dyn EmbeddingProvider>,
    store: &Arc<dyn VectorStore>,
    config: &RetrievalConfig,
    path: &Path,
    collection: &str,
) -> Result<usize> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RagError::SourceMissing(path.to_path_buf())
        } else {
            RagError::SourceRead { path: path.to_path_buf(), source: e }
        }
    })?;
    info!(path = %path.display(), bytes = text.len(), "loaded source document");

    let chunker = RecursiveChunker::new(config.chunk_size, config.chunk_overlap);
    let texts = chunker.chunk(&text);
    info!(chunk_count = texts.len(), "split document into chunks");

    let chunk_texts: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
    let embeddings = provider.embed_batch(&chunk_texts).await?;

    let chunks: Vec<Chunk> = texts
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(i, (text, embedding))| Chunk { id: format!("chunk_{i}"), text, embedding })
        .collect();

    // Recreate the collection so a re-run replaces stale contents.
    store.delete_collection(collection).await?;
    store.create_collection(collection).await?;
    store.upsert(collection, &chunks).await?;

    info!(collection, chunk_count = chunks.len(), "ingestion complete");
    Ok(chunks.len())
}
