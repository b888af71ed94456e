//! src/services/bucket_service.rs
//!
//! BucketService — bucket directory, referer policy store and usage report.
//! All state is reached through the repository traits; the caller's identity
//! is always passed in explicitly.

use crate::{
    models::{
        bucket::{AclMode, BucketInfo, BucketSummary},
        caller::Caller,
        referer::{RefererInfo, RefererPolicy},
        region::RegionInfo,
        usage::BucketUsageReport,
    },
    repository::{
        BucketRepository, RefererRepository, RegionRepository, SqliteStore, StoreError,
        UsageRepository,
    },
    services::{
        id_generator::{IdGenerator, RandomIdGenerator},
        usage::aggregate_usage,
    },
};
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BucketError {
    #[error("region `{0}` not found")]
    RegionNotFound(String),
    #[error("bucket name `{0}` is already taken")]
    BucketNameTaken(String),
    #[error("bucket `{0}` not found")]
    BucketNotFound(String),
    #[error("bucket `{name}` invalid: {reason}")]
    InvalidBucketName { name: String, reason: String },
    #[error("referer record conflicts with {0}")]
    RefererConflict(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type BucketResult<T> = Result<T, BucketError>;

impl From<StoreError> for BucketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(constraint) => BucketError::RefererConflict(constraint),
            StoreError::Sqlx(err) => BucketError::Sqlx(err),
        }
    }
}

#[derive(Clone)]
pub struct BucketService {
    regions: Arc<dyn RegionRepository>,
    buckets: Arc<dyn BucketRepository>,
    referers: Arc<dyn RefererRepository>,
    usage: Arc<dyn UsageRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl BucketService {
    pub fn new(
        regions: Arc<dyn RegionRepository>,
        buckets: Arc<dyn BucketRepository>,
        referers: Arc<dyn RefererRepository>,
        usage: Arc<dyn UsageRepository>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            regions,
            buckets,
            referers,
            usage,
            ids,
        }
    }

    /// Wire every repository to one SQLite store with random ids.
    pub fn with_store(store: SqliteStore) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(RandomIdGenerator),
        )
    }

    pub async fn list_regions(&self) -> BucketResult<Vec<RegionInfo>> {
        Ok(self.regions.list().await?)
    }

    /// Buckets owned by `owner_id` whose name contains `name_filter`.
    pub async fn list_bucket(
        &self,
        owner_id: Uuid,
        name_filter: Option<&str>,
    ) -> BucketResult<Vec<BucketSummary>> {
        Ok(self.buckets.list_by_owner(owner_id, name_filter).await?)
    }

    /// Create a bucket owned by `caller` in the region identified by `region_code`.
    ///
    /// The name count is only a fast path; the unique index on `buckets.name`
    /// is what keeps concurrent creations from both succeeding.
    pub async fn create(
        &self,
        caller: &Caller,
        name: &str,
        region_code: &str,
        acl: AclMode,
    ) -> BucketResult<BucketInfo> {
        let region = self
            .regions
            .find_by_code(region_code)
            .await?
            .ok_or_else(|| BucketError::RegionNotFound(region_code.to_string()))?;

        ensure_bucket_name_present(name)?;

        if !self.bucket_name_available(name).await? {
            return Err(BucketError::BucketNameTaken(name.to_string()));
        }

        let bucket = BucketInfo {
            id: self.ids.next_id(),
            name: name.to_string(),
            acl,
            region_id: region.id,
            user_id: caller.id,
            created_at: Utc::now(),
        };

        match self.buckets.insert(&bucket).await {
            Ok(()) => {
                info!(
                    bucket = %bucket.name,
                    owner = %caller.id,
                    region = %region.code,
                    "bucket created"
                );
                Ok(bucket)
            }
            Err(StoreError::Conflict(_)) => {
                debug!(bucket = %name, "lost bucket creation race");
                Err(BucketError::BucketNameTaken(name.to_string()))
            }
            Err(StoreError::Sqlx(err)) => Err(BucketError::Sqlx(err)),
        }
    }

    /// Resolve a bucket the caller owns, or `BucketNotFound`.
    pub async fn require_owned_bucket(
        &self,
        caller: &Caller,
        name: &str,
    ) -> BucketResult<BucketInfo> {
        self.buckets
            .find_by_name_and_owner(name, caller.id)
            .await?
            .ok_or_else(|| BucketError::BucketNotFound(name.to_string()))
    }

    pub async fn bucket_name_available(&self, name: &str) -> BucketResult<bool> {
        Ok(self.buckets.count_by_name(name).await? == 0)
    }

    /// True only when exactly one bucket matches both name and owner.
    pub async fn caller_owns_bucket(&self, owner_id: Uuid, name: &str) -> BucketResult<bool> {
        Ok(self.buckets.count_by_name_and_owner(name, owner_id).await? == 1)
    }

    /// The referer policy configured for a bucket, if any.
    pub async fn get_referer(&self, bucket_id: Uuid) -> BucketResult<Option<RefererPolicy>> {
        let referer = self.referers.find_by_bucket(bucket_id).await?;
        Ok(referer.map(RefererPolicy::from))
    }

    /// Replace the whole referer record for a bucket.
    ///
    /// Without an explicit `id` the bucket's existing record keeps its id,
    /// or a fresh one is issued. An explicit `id` must not belong to another
    /// bucket's record.
    pub async fn update_referer(
        &self,
        bucket_id: Uuid,
        id: Option<Uuid>,
        allow_empty: bool,
        white_list: Vec<String>,
    ) -> BucketResult<RefererPolicy> {
        let id = match id {
            Some(id) => {
                if let Some(existing) = self.referers.find_by_id(id).await? {
                    if existing.bucket_id != bucket_id {
                        return Err(BucketError::RefererConflict(format!(
                            "record {id} of another bucket"
                        )));
                    }
                }
                id
            }
            None => match self.referers.find_by_bucket(bucket_id).await? {
                Some(existing) => existing.id,
                None => self.ids.next_id(),
            },
        };

        let referer = RefererInfo {
            id,
            bucket_id,
            allow_empty,
            white_list: Json(white_list),
            updated_at: Utc::now(),
        };
        self.referers.upsert(&referer).await?;
        debug!(bucket_id = %bucket_id, referer_id = %id, "referer policy written");

        Ok(referer.into())
    }

    /// Per-bucket usage for the caller plus the folded summary.
    pub async fn usage_report(&self, caller: &Caller) -> BucketResult<BucketUsageReport> {
        let rows = self.usage.bucket_usage(caller.id).await?;
        Ok(aggregate_usage(rows))
    }
}

/// Reject names that are empty or consist only of whitespace.
fn ensure_bucket_name_present(name: &str) -> BucketResult<()> {
    if name.trim().is_empty() {
        return Err(BucketError::InvalidBucketName {
            name: name.to_string(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
