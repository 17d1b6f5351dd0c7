//! Core retrieval library for the ragserve RAG backend.
//!
//! Ingests a text document (split → embed → persist) and answers
//! nearest-neighbor queries against the persisted index, filtered by a
//! distance cutoff. There is no generation step — only retrieval.
//!
//! The two seams are traits: [`EmbeddingProvider`] (backed by
//! [`OpenAiEmbeddings`] in production, by fakes in tests) and
//! [`VectorStore`] (backed by [`DiskVectorStore`]). The HTTP surface lives
//! in the `ragserve-server` crate.

pub mod chunking;
pub mod config;
pub mod diskstore;
pub mod document;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod openai;
pub mod retriever;
pub mod vectorstore;

pub use chunking::{Chunker, RecursiveChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use diskstore::DiskVectorStore;
pub use document::{Chunk, QueryInput, RetrievalOutput, RetrievedChunk, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use ingest::ingest_file;
pub use openai::OpenAiEmbeddings;
pub use retriever::Retriever;
pub use vectorstore::VectorStore;
