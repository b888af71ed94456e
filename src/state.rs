use crate::{repository::SqliteStore, services::bucket_service::BucketService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub buckets: BucketService,

    /// Kept for readiness probing.
    pub db: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            buckets: BucketService::with_store(SqliteStore::new(db.clone())),
            db,
        }
    }
}
