use std::sync::Arc;

use landing_db::Store;
use landing_pipeline::UploadStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn Store>,
    /// Upload directory, created once at startup.
    pub uploads: Arc<UploadStorage>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
