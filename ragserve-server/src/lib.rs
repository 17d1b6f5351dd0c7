//! HTTP retrieval API for the ragserve RAG backend.

pub mod server;
pub mod settings;

pub use server::{AppState, app_router, run_server};
pub use settings::{AppPaths, ServerConfig};
