//! Error types for the `ragserve-core` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during ingestion or retrieval.
#[derive(Debug, Error)]
pub enum RagError {
    /// The source document to ingest does not exist.
    #[error("source file not found: {0}")]
    SourceMissing(PathBuf),

    /// The source document exists but could not be read.
    #[error("failed to read source file {path}: {source}")]
    SourceRead {
        /// Path of the source document.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The persisted vector index directory does not exist.
    ///
    /// Raised by retrieval when ingestion has never been run. This is a
    /// distinct error, never a silent empty result.
    #[error("vector index not found at {0}; run ingestion first")]
    IndexMissing(PathBuf),

    /// An error occurred while generating embeddings.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
