//! Persistence seams. Each entity gets its own repository trait exposing
//! intention-revealing queries; `SqliteStore` implements all of them.

use crate::models::{
    bucket::{BucketInfo, BucketSummary},
    referer::RefererInfo,
    region::RegionInfo,
    usage::BucketUsageRow,
};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod sqlite;

pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RegionRepository: Send + Sync + 'static {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<RegionInfo>>;

    async fn list(&self) -> StoreResult<Vec<RegionInfo>>;
}

#[async_trait]
pub trait BucketRepository: Send + Sync + 'static {
    /// Buckets owned by `owner`, optionally filtered by a name substring.
    async fn list_by_owner(
        &self,
        owner: Uuid,
        name_filter: Option<&str>,
    ) -> StoreResult<Vec<BucketSummary>>;

    async fn find_by_name_and_owner(
        &self,
        name: &str,
        owner: Uuid,
    ) -> StoreResult<Option<BucketInfo>>;

    async fn count_by_name(&self, name: &str) -> StoreResult<i64>;

    async fn count_by_name_and_owner(&self, name: &str, owner: Uuid) -> StoreResult<i64>;

    /// Insert a new bucket. A name collision surfaces as `StoreError::Conflict`.
    async fn insert(&self, bucket: &BucketInfo) -> StoreResult<()>;
}

#[async_trait]
pub trait RefererRepository: Send + Sync + 'static {
    async fn find_by_bucket(&self, bucket_id: Uuid) -> StoreResult<Option<RefererInfo>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<RefererInfo>>;

    /// Replace the whole record for `referer.bucket_id`. A `referer.id`
    /// already used by another bucket's row is a `StoreError::Conflict`.
    async fn upsert(&self, referer: &RefererInfo) -> StoreResult<()>;
}

#[async_trait]
pub trait UsageRepository: Send + Sync + 'static {
    /// One row per bucket owned by `owner`, ordered by bucket name.
    async fn bucket_usage(&self, owner: Uuid) -> StoreResult<Vec<BucketUsageRow>>;
}
