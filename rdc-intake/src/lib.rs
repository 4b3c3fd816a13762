//! rdc-intake library - research data intake service
//!
//! Receives multipart submissions (participant metadata plus up to five
//! photographs), validates them, and persists to SQLite and the configured
//! image storage backend.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use rdc_common::ImageSlot;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

pub mod api;
pub mod db;
pub mod error;
pub mod storage;

pub use error::ApiError;
pub use storage::ImageStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Image storage backend, selected once at startup
    pub store: Arc<dyn ImageStore>,
    /// Per-file upload ceiling in bytes
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(db: SqlitePool, store: Arc<dyn ImageStore>, max_file_size: usize) -> Self {
        Self {
            db,
            store,
            max_file_size,
        }
    }
}

/// Build the application router.
///
/// `static_root` is the local upload root to serve under `/api/images`;
/// pass `None` in object-storage mode, where local serving is disabled.
pub fn build_router(state: AppState, static_root: Option<&Path>) -> Router {
    use axum::routing::{get, post};

    // One submission can carry five files plus the metadata part
    let body_limit = state.max_file_size * ImageSlot::ALL.len() + 1024 * 1024;

    let mut router = Router::new()
        .route("/api/submit", post(api::submit))
        .route("/api/participants", get(api::list_participants))
        .route("/api/participants/:id", get(api::get_participant))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(body_limit));

    if let Some(root) = static_root {
        router = router.nest_service(
            "/api/images",
            tower_http::services::ServeDir::new(root),
        );
    }

    router.with_state(state)
}
