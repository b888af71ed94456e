#![allow(dead_code)]

use bucket_service::{
    db,
    models::{caller::Caller, object::ObjectRecord},
    repository::SqliteStore,
    services::{bucket_service::BucketService, id_generator::RandomIdGenerator},
    state::AppState,
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

pub async fn setup_pool() -> Arc<SqlitePool> {
    let pool = db::connect("sqlite::memory:").await.expect("connect");
    db::run_migrations(&pool).await.expect("migrate");
    db::seed_regions(&pool, &RandomIdGenerator)
        .await
        .expect("seed regions");
    Arc::new(pool)
}

pub async fn setup_service() -> (BucketService, SqliteStore) {
    let store = SqliteStore::new(setup_pool().await);
    (BucketService::with_store(store.clone()), store)
}

pub async fn setup_state() -> AppState {
    AppState::new(setup_pool().await)
}

pub fn new_caller() -> Caller {
    Caller::new(Uuid::new_v4())
}

pub async fn bucket_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM buckets")
        .fetch_one(pool)
        .await
        .expect("count buckets")
}

pub async fn put_object(store: &SqliteStore, bucket_id: Uuid, key: &str, size: i64) {
    store
        .insert_object(&ObjectRecord {
            id: Uuid::new_v4(),
            bucket_id,
            key: key.to_string(),
            size,
            created_at: Utc::now(),
        })
        .await
        .expect("insert object");
}
