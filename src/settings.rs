//! Process-level settings read by the binaries.

use std::path::PathBuf;

use ai_llm_service::error_handler::{env_flag, env_or, env_parse_or};

/// Where the server finds its data and how it stores answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    pub pages_csv: PathBuf,
    pub embeddings_csv: PathBuf,
    /// Load page data once at startup instead of on every query.
    pub preload_pages: bool,
    pub database_url: String,
    pub embedding_dim: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            pages_csv: PathBuf::from("data/pages.csv"),
            embeddings_csv: PathBuf::from("data/embeddings.csv"),
            preload_pages: false,
            database_url: "sqlite://data/questions.db".to_string(),
            embedding_dim: 1536,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            pages_csv: std::env::var_os("PAGES_CSV").map_or(d.pages_csv, PathBuf::from),
            embeddings_csv: std::env::var_os("EMBEDDINGS_CSV")
                .map_or(d.embeddings_csv, PathBuf::from),
            preload_pages: env_flag("PRELOAD_PAGES", d.preload_pages),
            database_url: env_or("DATABASE_URL", &d.database_url),
            embedding_dim: env_parse_or("EMBEDDING_DIM", d.embedding_dim),
        }
    }
}
