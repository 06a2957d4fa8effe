//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostStore;
use quill_infra::{DatabaseConfig, MemoryPostStore};

#[cfg(feature = "postgres")]
use quill_infra::PostgresPostStore;
#[cfg(feature = "postgres")]
use quill_infra::database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    /// Build the application state with the appropriate store implementation.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostStore> = {
            if let Some(config) = db_config {
                match database::connect(config).await {
                    Ok(conn) => Arc::new(PostgresPostStore::new(conn)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(MemoryPostStore::new())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(MemoryPostStore::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostStore> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(MemoryPostStore::new())
        };

        tracing::info!("Application state initialized");

        Self { posts }
    }

    /// State over an explicit store. The test suites use this to point the
    /// app at the same storage target they cross-check directly.
    pub fn with_store(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }
}
