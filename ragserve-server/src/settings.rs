//! Runtime settings for the server and its binaries.
//!
//! Defaults match the shipped repo layout; everything is overridable via
//! `RAGSERVE_*` environment variables (loaded from `.env` by the binaries).

use std::path::PathBuf;

/// Bind address for the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

impl ServerConfig {
    /// Read `RAGSERVE_HOST` / `RAGSERVE_PORT`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("RAGSERVE_HOST").unwrap_or(defaults.host),
            port: std::env::var("RAGSERVE_PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// Filesystem locations and the collection name shared by the server and
/// the ingestion binaries.
#[derive(Clone, Debug)]
pub struct AppPaths {
    /// Source document consumed by ingestion.
    pub data_file: PathBuf,
    /// Root directory of the persisted vector index.
    pub index_dir: PathBuf,
    /// Directory holding the static frontend assets.
    pub static_dir: PathBuf,
    /// Collection name within the index.
    pub collection: String,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/corpus.txt"),
            index_dir: PathBuf::from("index_db"),
            static_dir: PathBuf::from("static"),
            collection: "corpus".to_string(),
        }
    }
}

impl AppPaths {
    /// Read `RAGSERVE_DATA_FILE` / `RAGSERVE_INDEX_DIR` /
    /// `RAGSERVE_STATIC_DIR` / `RAGSERVE_COLLECTION`, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_file: std::env::var("RAGSERVE_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            index_dir: std::env::var("RAGSERVE_INDEX_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_dir),
            static_dir: std::env::var("RAGSERVE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            collection: std::env::var("RAGSERVE_COLLECTION").unwrap_or(defaults.collection),
        }
    }
}
