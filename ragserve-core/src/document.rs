//! Data types for chunks, search hits, and the retrieval API contract.

use serde::{Deserialize, Serialize};

/// A contiguous span of source text produced by splitting, with its
/// vector embedding. Created once during ingestion and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Stable identifier assigned at ingestion, `chunk_<ordinal>` in split order.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
}

/// A stored [`Chunk`] paired with its distance to a query embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Vector distance to the query (lower is more similar).
    pub distance: f32,
}

/// Request body for the retrieval endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryInput {
    /// The user's query string. Emptiness is checked by the API boundary,
    /// not here.
    pub query_text: String,
}

/// A single retrieved chunk as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievedChunk {
    /// The stable chunk identifier assigned at ingestion.
    pub id: String,
    /// Vector distance, rounded to 4 decimal places. Lower is more
    /// similar; not bounded to [0, 1] despite the field name.
    pub score: f32,
    /// The raw chunk content.
    pub text: String,
}

/// Response body for the retrieval endpoint.
///
/// `num_results` always equals `results.len()`. Failures surface as
/// [`RagError`](crate::RagError), never as sentinel entries in `results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOutput {
    /// Retrieved chunks ranked by ascending distance, truncated to top-K
    /// and filtered by the distance cutoff.
    pub results: Vec<RetrievedChunk>,
    /// Number of chunks in `results`.
    pub num_results: usize,
}
