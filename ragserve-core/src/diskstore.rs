//! On-disk vector store with lazy, memoized collection loading.
//!
//! [`DiskVectorStore`] persists each collection as a JSON file under a root
//! directory and keeps loaded collections cached in memory behind a
//! `tokio::sync::RwLock`. The cache makes the first search per collection
//! pay the disk read; later searches hit memory. The lock doubles as the
//! one-time-initialization guard, so concurrent first requests cannot race
//! the load.
//!
//! Search uses squared Euclidean (L2) distance, lower is more similar. This
//! matches the metric the default distance cutoff (1.35) was calibrated
//! against.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// A persistent vector store rooted at a directory, one JSON file per
/// collection.
///
/// Produced by the ingestion pipeline and consumed read-only by retrieval.
/// Opening a collection fails with [`RagError::IndexMissing`] when the root
/// directory does not exist (ingestion has never run).
pub struct DiskVectorStore {
    root: PathBuf,
    collections: RwLock<HashMap<String, HashMap<String, Chunk>>>,
}

impl DiskVectorStore {
    /// Create a store handle rooted at `root`. No I/O happens until a
    /// collection is first touched.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), collections: RwLock::new(HashMap::new()) }
    }

    /// Path of the persisted file backing a collection.
    fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    fn store_error(&self, message: impl Into<String>) -> RagError {
        RagError::Store { backend: "disk".into(), message: message.into() }
    }

    /// Collection names become file names; keep them flat.
    fn validate_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            return Err(self.store_error(format!("invalid collection name '{name}'")));
        }
        Ok(())
    }

    /// Load a collection from disk into the cache if it is not already there.
    async fn ensure_loaded(&self, name: &str) -> Result<()> {
        {
            let cache = self.collections.read().await;
            if cache.contains_key(name) {
                return Ok(());
            }
        }

        if !self.root.exists() {
            return Err(RagError::IndexMissing(self.root.clone()));
        }

        let path = self.collection_path(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                self.store_error(format!("collection '{name}' does not exist"))
            } else {
                self.store_error(format!("failed to read {}: {e}", path.display()))
            }
        })?;

        let chunks: Vec<Chunk> = serde_json::from_slice(&bytes)
            .map_err(|e| self.store_error(format!("corrupt collection file {}: {e}", path.display())))?;

        let mut cache = self.collections.write().await;
        // Another task may have loaded it while we read the file.
        cache
            .entry(name.to_string())
            .or_insert_with(|| chunks.into_iter().map(|c| (c.id.clone(), c)).collect());

        debug!(collection = name, "loaded collection from disk");
        Ok(())
    }

    /// Write a collection's chunks back to its file, sorted by id so the
    /// output is stable across runs.
    async fn persist(&self, name: &str, chunks: &HashMap<String, Chunk>) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| self.store_error(format!("failed to create {}: {e}", self.root.display())))?;

        let mut sorted: Vec<&Chunk> = chunks.values().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let json = serde_json::to_vec(&sorted)
            .map_err(|e| self.store_error(format!("failed to serialize collection '{name}': {e}")))?;

        let path = self.collection_path(name);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| self.store_error(format!("failed to write {}: {e}", path.display())))?;
        Ok(())
    }
}

/// Squared Euclidean distance between two vectors.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    async fn create_collection(&self, name: &str) -> Result<()> {
        self.validate_name(name)?;

        let mut cache = self.collections.write().await;
        let chunks = cache.entry(name.to_string()).or_default();
        if !self.collection_path(name).exists() {
            self.persist(name, chunks).await?;
            info!(collection = name, root = %self.root.display(), "created collection");
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.validate_name(name)?;

        let mut cache = self.collections.write().await;
        cache.remove(name);

        let path = self.collection_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(collection = name, "deleted collection");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_error(format!("failed to remove {}: {e}", path.display()))),
        }
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        self.validate_name(collection)?;
        self.ensure_loaded(collection).await?;

        let mut cache = self.collections.write().await;
        let store = cache
            .get_mut(collection)
            .ok_or_else(|| self.store_error(format!("collection '{collection}' does not exist")))?;
        for chunk in chunks {
            store.insert(chunk.id.clone(), chunk.clone());
        }

        // Persist while still holding the lock so concurrent upserts
        // cannot interleave stale file writes.
        self.persist(collection, store).await
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        self.validate_name(collection)?;
        self.ensure_loaded(collection).await?;

        let cache = self.collections.read().await;
        let store = cache
            .get(collection)
            .ok_or_else(|| self.store_error(format!("collection '{collection}' does not exist")))?;

        let mut scored: Vec<SearchResult> = store
            .values()
            .map(|chunk| {
                let distance = squared_l2(&chunk.embedding, embedding);
                SearchResult { chunk: chunk.clone(), distance }
            })
            .collect();

        scored.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}
