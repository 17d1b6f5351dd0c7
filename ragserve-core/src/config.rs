//! Configuration for chunking and retrieval.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Parameters governing chunk splitting and nearest-neighbor filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of nearest neighbors requested from the index per query.
    pub top_k: usize,
    /// Inclusive upper bound on reported distances. Results farther than
    /// this are dropped. Squared-L2 distance, lower is more similar.
    pub max_distance: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { chunk_size: 500, chunk_overlap: 50, top_k: 3, max_distance: 1.35 }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of nearest neighbors requested per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the maximum distance cutoff for retrieved results.
    pub fn max_distance(mut self, distance: f32) -> Self {
        self.config.max_distance = distance;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if:
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `max_distance` is not a finite positive number
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Config("top_k must be greater than zero".to_string()));
        }
        if !self.config.max_distance.is_finite() || self.config.max_distance <= 0.0 {
            return Err(RagError::Config(format!(
                "max_distance ({}) must be a finite positive number",
                self.config.max_distance
            )));
        }
        Ok(self.config)
    }
}
